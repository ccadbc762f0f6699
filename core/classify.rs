use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Number of leading bytes sampled from a file.
const SAMPLE_LEN: u64 = 512;

/// Maximum fraction of the sample allowed outside the printable set.
const MAX_BINARY_RATIO: f64 = 0.05;

/// Best-effort text-vs-binary sniffing over the leading bytes of a file.
/// This is a heuristic, not content-type detection: a file counts as text
/// when fewer than 5% of its sampled bytes fall outside tab, newline,
/// carriage return and printable ASCII.
///
/// Unreadable files (permissions, races) are classified as non-text so a
/// traversal over them never aborts.
pub fn is_text_file(path: &Path) -> bool {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            log::debug!("Cannot open {} for sampling: {}", path.display(), err);
            return false;
        }
    };

    let mut sample = Vec::with_capacity(SAMPLE_LEN as usize);
    if let Err(err) = file.take(SAMPLE_LEN).read_to_end(&mut sample) {
        log::debug!("Cannot sample {}: {}", path.display(), err);
        return false;
    }
    if sample.is_empty() {
        return true;
    }

    let suspicious = sample.iter().filter(|&&b| !is_printable_byte(b)).count();
    (suspicious as f64) < (sample.len() as f64) * MAX_BINARY_RATIO
}

fn is_printable_byte(byte: u8) -> bool {
    matches!(byte, b'\t' | b'\n' | b'\r' | 0x20..=0x7E)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn printable_content_is_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("file.txt");
        fs::write(&path, "hello world\nsecond line\r\n\ttabbed").unwrap();
        assert!(is_text_file(&path));
    }

    #[test]
    fn empty_file_is_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, "").unwrap();
        assert!(is_text_file(&path));
    }

    #[test]
    fn binary_content_is_not_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("image.png");
        fs::write(&path, [0xFF, 0xD8, 0xFF, 0x00, 0x1B, 0x7F]).unwrap();
        assert!(!is_text_file(&path));
    }

    #[test]
    fn mostly_printable_content_stays_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("almost.txt");
        // 2 odd bytes out of 100 stays under the 5% threshold.
        let mut content = vec![b'a'; 98];
        content.extend([0x00, 0xFF]);
        fs::write(&path, &content).unwrap();
        assert!(is_text_file(&path));
    }

    #[test]
    fn threshold_is_strict() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("edge.bin");
        // Exactly 5% non-printable is classified as binary.
        let mut content = vec![b'a'; 95];
        content.extend([0u8; 5]);
        fs::write(&path, &content).unwrap();
        assert!(!is_text_file(&path));
    }

    #[test]
    fn missing_file_is_not_text() {
        let dir = tempdir().unwrap();
        assert!(!is_text_file(&dir.path().join("nope.txt")));
    }

    #[test]
    fn only_leading_bytes_are_sampled() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tail.bin");
        // Binary garbage past the sample window is invisible to the check.
        let mut content = vec![b'a'; SAMPLE_LEN as usize];
        content.extend(vec![0u8; 256]);
        fs::write(&path, &content).unwrap();
        assert!(is_text_file(&path));
    }
}
