//! Punctuation style conversion between CJK full-width and ASCII forms.

/// Converts full-width punctuation to its ASCII counterpart, character by
/// character. Everything outside the mapping passes through untouched.
pub fn to_english(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for ch in input.chars() {
        match ascii_for(ch) {
            Some(replacement) => output.push_str(replacement),
            None => output.push(ch),
        }
    }
    output
}

/// Converts ASCII punctuation to full-width form. Straight quotes carry no
/// open/close distinction, so occurrences alternate: odd ones open, even
/// ones close.
pub fn to_chinese(input: &str) -> String {
    let mut output = String::with_capacity(input.len() * 3);
    let mut single_quotes = 0usize;
    let mut double_quotes = 0usize;
    for ch in input.chars() {
        match ch {
            '"' => {
                double_quotes += 1;
                output.push(if double_quotes % 2 == 1 { '“' } else { '”' });
            }
            '\'' => {
                single_quotes += 1;
                output.push(if single_quotes % 2 == 1 { '‘' } else { '’' });
            }
            _ => match full_width_for(ch) {
                Some(replacement) => output.push(replacement),
                None => output.push(ch),
            },
        }
    }
    output
}

fn ascii_for(ch: char) -> Option<&'static str> {
    Some(match ch {
        '。' => ".",
        '、' | '，' => ",",
        '！' => "!",
        '？' => "?",
        '‘' | '’' => "'",
        '“' | '”' => "\"",
        '：' => ":",
        '；' => ";",
        '（' => "(",
        '）' => ")",
        '【' => "[",
        '】' => "]",
        '《' => "<",
        '》' => ">",
        '…' => "...",
        '「' => "{",
        '」' => "}",
        '—' => "-",
        _ => return None,
    })
}

fn full_width_for(ch: char) -> Option<char> {
    Some(match ch {
        '.' => '。',
        ',' => '，',
        '!' => '！',
        '?' => '？',
        ':' => '：',
        ';' => '；',
        '(' => '（',
        ')' => '）',
        '[' => '【',
        ']' => '】',
        '<' => '《',
        '>' => '》',
        '{' => '「',
        '}' => '」',
        '-' => '—',
        _ => return None,
    })
}
