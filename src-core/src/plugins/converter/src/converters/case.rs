//! 大小写风格转换
//!
//! 所有风格共享同一个分词器：在大小写转换处、缩写词边界、字母与数字边界，
//! 以及任何非字母数字分隔符处断词。

/// 拆分单词
///
/// `"XMLHttpRequest2go"` → `["XML", "Http", "Request", "2", "go"]`
pub fn split_words(text: &str) -> Vec<String> {
    let mut words = Vec::new();

    for run in text.split(|c: char| !c.is_alphanumeric()) {
        if run.is_empty() {
            continue;
        }

        let chars: Vec<char> = run.chars().collect();
        let mut current = String::new();

        for (i, &c) in chars.iter().enumerate() {
            if i > 0 {
                let prev = chars[i - 1];
                let next = chars.get(i + 1);

                let lower_to_upper = prev.is_lowercase() && c.is_uppercase();
                let acronym_end = prev.is_uppercase()
                    && c.is_uppercase()
                    && next.is_some_and(|n| n.is_lowercase());
                let letter_digit = prev.is_numeric() != c.is_numeric();

                if lower_to_upper || acronym_end || letter_digit {
                    words.push(std::mem::take(&mut current));
                }
            }
            current.push(c);
        }

        if !current.is_empty() {
            words.push(current);
        }
    }

    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn join_lower(text: &str, separator: &str) -> String {
    split_words(text)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(separator)
}

pub fn to_camel_case(text: &str) -> String {
    split_words(text)
        .iter()
        .enumerate()
        .map(|(i, w)| if i == 0 { w.to_lowercase() } else { capitalize(w) })
        .collect()
}

pub fn to_pascal_case(text: &str) -> String {
    split_words(text).iter().map(|w| capitalize(w)).collect()
}

pub fn to_snake_case(text: &str) -> String {
    join_lower(text, "_")
}

pub fn to_kebab_case(text: &str) -> String {
    join_lower(text, "-")
}

pub fn to_constant_case(text: &str) -> String {
    split_words(text)
        .iter()
        .map(|w| w.to_uppercase())
        .collect::<Vec<_>>()
        .join("_")
}

pub fn to_title_case(text: &str) -> String {
    split_words(text)
        .iter()
        .map(|w| capitalize(w))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn to_sentence_case(text: &str) -> String {
    split_words(text)
        .iter()
        .enumerate()
        .map(|(i, w)| if i == 0 { capitalize(w) } else { w.to_lowercase() })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn to_dot_case(text: &str) -> String {
    join_lower(text, ".")
}

pub fn to_path_case(text: &str) -> String {
    join_lower(text, "/")
}

/// 空格分隔的小写单词
pub fn to_words(text: &str) -> String {
    join_lower(text, " ")
}
