//! 代码检测器
//!
//! 两阶段策略：
//! 1. 语言签名打分：任一语言至少命中一条签名即视为代码
//! 2. 通用特征计数：至少命中两项通用代码特征

use crate::patterns::{CODE_INDICATORS, LANGUAGE_SIGNATURES};

/// 每种语言命中的签名数（按声明顺序）
pub fn language_scores(text: &str) -> Vec<(&'static str, usize)> {
    LANGUAGE_SIGNATURES
        .iter()
        .map(|signature| {
            let score = signature
                .patterns
                .iter()
                .filter(|pattern| pattern.is_match(text))
                .count();
            (signature.language, score)
        })
        .collect()
}

/// 检测代码语言
///
/// 得分严格最高者胜出，平分时取先声明的语言；全部为零时返回 None
pub fn detect_code_language(text: &str) -> Option<&'static str> {
    let mut best: Option<(&'static str, usize)> = None;

    for (language, score) in language_scores(text) {
        if score == 0 {
            continue;
        }
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((language, score)),
        }
    }

    best.map(|(language, _)| language)
}

/// 命中的通用代码特征数
pub fn code_indicator_count(text: &str) -> usize {
    CODE_INDICATORS
        .iter()
        .filter(|indicator| indicator.is_match(text))
        .count()
}

/// 检测是否为代码
pub fn is_code(text: &str, min_length: usize) -> bool {
    let trimmed = text.trim();

    if trimmed.chars().count() < min_length {
        return false;
    }

    if detect_code_language(trimmed).is_some() {
        return true;
    }

    code_indicator_count(trimmed) >= 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_javascript_detection() {
        assert_eq!(detect_code_language("function foo() { return 1; }"), Some("javascript"));
        assert_eq!(
            detect_code_language("const items = [];\nconsole.log(items);"),
            Some("javascript")
        );
    }

    #[test]
    fn test_typescript_detection() {
        let code = "interface User {\n    name: string;\n    age: number;\n}";
        assert_eq!(detect_code_language(code), Some("typescript"));
    }

    #[test]
    fn test_python_detection() {
        let code = "def hello():\n    print(\"Hello, world!\")\n    return True";
        assert_eq!(detect_code_language(code), Some("python"));
    }

    #[test]
    fn test_java_detection() {
        let code = "@Override\nprotected void run() {\n    System.out.println(\"hi\");\n}";
        assert_eq!(detect_code_language(code), Some("java"));
    }

    #[test]
    fn test_html_detection() {
        let code = "<div class=\"container\">\n    <p>Hello</p>\n</div>";
        assert_eq!(detect_code_language(code), Some("html"));
    }

    #[test]
    fn test_css_detection() {
        let code = "@media print {\n  .container {\n    margin: 0;\n  }\n}";
        assert_eq!(detect_code_language(code), Some("css"));
    }

    #[test]
    fn test_json_detection() {
        let code = "{\n  \"name\": \"test\",\n  \"value\": 123\n}";
        assert_eq!(detect_code_language(code), Some("json"));
    }

    #[test]
    fn test_sql_detection() {
        let code = "CREATE TABLE users (id INT);\nSELECT id FROM users";
        assert_eq!(detect_code_language(code), Some("sql"));
    }

    #[test]
    fn test_shell_detection() {
        let code = "git clone repo && mkdir build\necho $(pwd)";
        assert_eq!(detect_code_language(code), Some("shell"));
    }

    #[test]
    fn test_tie_goes_to_first_declared() {
        // javascript 与 python 均命中一条签名
        let scores = language_scores("import os");
        assert_eq!(scores[0], ("javascript", 1));
        assert_eq!(scores[2], ("python", 1));
        assert_eq!(detect_code_language("import os"), Some("javascript"));
    }

    #[test]
    fn test_no_language() {
        assert_eq!(detect_code_language("Hello there, nice weather today."), None);
        assert_eq!(detect_code_language(""), None);
    }

    #[test]
    fn test_short_input_never_code() {
        assert!(!is_code("{}", 10));
        assert!(!is_code("x = [1];", 10));
        assert!(!is_code("   {}   ", 10));
    }

    #[test]
    fn test_generic_indicators() {
        // 无语言签名，但命中括号与运算符两项特征
        let text = "x1 == y2 (maybe)";
        assert_eq!(detect_code_language(text), None);
        assert!(code_indicator_count(text) >= 2);
        assert!(is_code(text, 10));
    }

    #[test]
    fn test_single_indicator_is_not_code() {
        let text = "Meeting notes (draft) for tomorrow";
        assert_eq!(detect_code_language(text), None);
        assert_eq!(code_indicator_count(text), 1);
        assert!(!is_code(text, 10));
    }

    #[test]
    fn test_comment_indicator() {
        assert!(code_indicator_count("/* block\ncomment */") >= 1);
        assert!(code_indicator_count("x // trailing") >= 1);
    }
}
