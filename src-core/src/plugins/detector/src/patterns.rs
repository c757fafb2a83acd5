//! 模式库
//!
//! 识别颜色、URL 与各语言代码特征所用的全部正则。
//! 通过 `once_cell::sync::Lazy` 在首次使用时编译，之后只读共享。

use once_cell::sync::Lazy;
use regex::Regex;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("内置正则必须合法")
}

// ---- 颜色 ----

/// #RGB / #RRGGBB
pub static HEX_COLOR: Lazy<Regex> = Lazy::new(|| compile(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$"));

/// rgb(r, g, b)
pub static RGB_COLOR: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?i)^rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)$")
});

/// rgba(r, g, b, a)
pub static RGBA_COLOR: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?i)^rgba\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*([\d.]+)\s*\)$")
});

/// hsl(h, s%, l%)
pub static HSL_COLOR: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?i)^hsl\(\s*(\d{1,3})\s*,\s*(\d{1,3})%\s*,\s*(\d{1,3})%\s*\)$")
});

/// hsla(h, s%, l%, a)
pub static HSLA_COLOR: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?i)^hsla\(\s*(\d{1,3})\s*,\s*(\d{1,3})%\s*,\s*(\d{1,3})%\s*,\s*([\d.]+)\s*\)$")
});

// ---- URL ----

/// 严格 URL：必须带 http(s) 协议、主机与顶级域名
pub static STRICT_URL: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"^https?://(www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b([-a-zA-Z0-9()@:%_+.~#?&/=]*)$",
    )
});

/// 宽松 URL：允许省略协议的裸域名，如 `example.com/path`
pub static LOOSE_URL: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?i)^(https?://)?([\da-z.-]+)\.([a-z.]{2,6})([/\w .-]*)*/?$")
});

/// 域名兜底提取：协议与 www. 之后、第一个 `/` 或空白之前的部分
pub static DOMAIN_FALLBACK: Lazy<Regex> =
    Lazy::new(|| compile(r"(?:https?://)?(?:www\.)?([^/\s]+)"));

// ---- 代码 ----

/// 单个语言的特征签名
pub struct LanguageSignature {
    pub language: &'static str,
    pub patterns: Vec<Regex>,
}

/// 语言签名表，声明顺序即平分时的优先顺序
pub static LANGUAGE_SIGNATURES: Lazy<Vec<LanguageSignature>> = Lazy::new(|| {
    let table: [(&'static str, &[&str]); 9] = [
        (
            "javascript",
            &[
                r"\b(const|let|var|function|class|import|export|async|await|=>)\b",
                r"\bconsole\.(log|error|warn)",
                r"\b(document|window|Promise|Array|Object)\.",
            ],
        ),
        (
            "typescript",
            &[
                r"\b(interface|type|enum|namespace|implements|declare)\b",
                r":\s*(string|number|boolean|any|void|never)\b",
                r"<[A-Z]\w*>",
            ],
        ),
        (
            "python",
            &[
                r"\b(def|class|import|from|if __name__|lambda|yield|async def)\b",
                r"\bprint\(",
                r"(?m)^\s*#.*$",
            ],
        ),
        (
            "java",
            &[
                r"\b(public|private|protected|class|interface|extends|implements)\b",
                r"\bSystem\.out\.print",
                r"@(Override|Autowired|Bean)\b",
            ],
        ),
        (
            "html",
            &[
                r"(?i)<(!DOCTYPE|html|head|body|div|span|p|a|img|script|style)\b",
                r"</\w+>",
                r"\s(class|id|href|src)=",
            ],
        ),
        (
            "css",
            &[
                r"[.#][\w-]+\s*\{",
                r"\b(margin|padding|display|color|background|font|border):",
                r"@(media|import|keyframes)",
            ],
        ),
        (
            "json",
            &[r"^\s*[\[{]", r#""[\w-]+"\s*:"#, r"(?m)^\s*[\]}]\s*$"],
        ),
        (
            "sql",
            &[
                r"(?i)\b(SELECT|INSERT|UPDATE|DELETE|FROM|WHERE|JOIN|GROUP BY|ORDER BY)\b",
                r"(?i)\b(CREATE|ALTER|DROP)\s+(TABLE|DATABASE|INDEX)\b",
            ],
        ),
        (
            "shell",
            &[
                r"(?m)^\s*(npm|yarn|pip|apt|brew|git|docker|kubectl)\s",
                r"\$\(.*\)",
                r"\b(echo|export|source|chmod|mkdir|cd)\b",
            ],
        ),
    ];

    table
        .iter()
        .map(|&(language, patterns)| LanguageSignature {
            language,
            patterns: patterns.iter().map(|p| compile(p)).collect(),
        })
        .collect()
});

/// 通用代码特征：括号/分号、行首缩进、多行、比较运算符、注释
pub static CODE_INDICATORS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"[{}\[\]();]",
        r"(?m)^\s{2,}",
        r"\n.*\n.*\n",
        r"[=!<>]{2,3}",
        r"//.*|/\*(?s:.*?)\*/",
    ]
    .iter()
    .map(|p| compile(p))
    .collect()
});

/// 已知语言标识（按声明顺序）
pub fn known_languages() -> Vec<&'static str> {
    LANGUAGE_SIGNATURES.iter().map(|s| s.language).collect()
}
