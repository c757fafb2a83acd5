//! URL 转换
//!
//! 不以 `http` 开头的输入先补 `https://` 再解析。

use std::collections::BTreeMap;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use snipwise_common::{ConvertError, ConvertResult};
use snipwise_detector::with_http_scheme;
use url::Url;

/// 与 encodeURIComponent 一致：保留字母数字与 `-_.!~*'()`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// shorten_url 的默认最大长度
pub const DEFAULT_SHORTEN_LENGTH: usize = 50;

/// URL 结构信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlInfo {
    /// 协议（不含 `:`）
    pub protocol: String,
    pub domain: String,
    pub path: String,
    pub params: BTreeMap<String, String>,
    /// 片段（不含 `#`）
    pub hash: String,
}

fn normalize(input: &str) -> ConvertResult<Url> {
    let trimmed = input.trim();
    let candidate = with_http_scheme(trimmed);
    Url::parse(&candidate).map_err(|e| ConvertError::InvalidUrl(format!("{}: {}", trimmed, e)))
}

fn collect_params(url: &Url) -> BTreeMap<String, String> {
    // 重复键以最后一次出现为准
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

pub fn url_encode(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

/// 百分号解码；`%` 后必须跟两位十六进制，结果必须是合法 UTF-8
pub fn url_decode(text: &str) -> ConvertResult<String> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return Err(ConvertError::Decode(format!(
                    "malformed percent sequence at byte {}",
                    i
                )));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    percent_decode_str(text)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| ConvertError::Decode(format!("decoded bytes are not UTF-8: {}", e)))
}

pub fn parse_url_params(url: &str) -> ConvertResult<BTreeMap<String, String>> {
    Ok(collect_params(&normalize(url)?))
}

/// 在基础 URL 上追加查询参数
pub fn build_url(base: &str, params: &[(&str, &str)]) -> ConvertResult<String> {
    let mut url = normalize(base)?;
    if !params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in params {
            pairs.append_pair(key, value);
        }
    }
    Ok(url.to_string())
}

pub fn extract_domain(url: &str) -> ConvertResult<String> {
    let parsed = normalize(url)?;
    Ok(parsed.host_str().unwrap_or_default().to_string())
}

pub fn extract_path(url: &str) -> ConvertResult<String> {
    Ok(normalize(url)?.path().to_string())
}

pub fn is_valid_url(url: &str) -> bool {
    normalize(url).is_ok()
}

pub fn get_url_info(url: &str) -> ConvertResult<UrlInfo> {
    let parsed = normalize(url)?;
    Ok(UrlInfo {
        protocol: parsed.scheme().to_string(),
        domain: parsed.host_str().unwrap_or_default().to_string(),
        path: parsed.path().to_string(),
        params: collect_params(&parsed),
        hash: parsed.fragment().unwrap_or_default().to_string(),
    })
}

fn truncate_with_ellipsis(text: &str, max_length: usize) -> String {
    let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// 缩短 URL 用于显示
///
/// 优先保留域名和路径末尾：`domain/...tail`
pub fn shorten_url(url: &str, max_length: usize) -> String {
    if url.chars().count() <= max_length {
        return url.to_string();
    }

    let Ok(parsed) = normalize(url) else {
        return truncate_with_ellipsis(url, max_length);
    };

    let domain = parsed.host_str().unwrap_or_default();
    let path = parsed.path();
    let path_len = path.chars().count();

    // 预留 "/..." 和余量
    let remaining = max_length as i64 - domain.chars().count() as i64 - 6;
    if remaining > 0 && path_len as i64 > remaining {
        let tail: String = path.chars().skip(path_len - remaining as usize).collect();
        return format!("{}/...{}", domain, tail);
    }

    truncate_with_ellipsis(&format!("{}{}", domain, path), max_length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_encode_matches_uri_component() {
        assert_eq!(url_encode("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(url_encode("-_.!~*'()"), "-_.!~*'()");
        assert_eq!(url_encode("你好"), "%E4%BD%A0%E5%A5%BD");
        assert_eq!(url_encode("a/b?c"), "a%2Fb%3Fc");
    }

    #[test]
    fn test_url_decode() {
        assert_eq!(url_decode("a%20b%26c").unwrap(), "a b&c");
        assert_eq!(url_decode("%E4%BD%A0%E5%A5%BD").unwrap(), "你好");
        assert_eq!(url_decode("a+b").unwrap(), "a+b");
        assert_eq!(url_decode("plain").unwrap(), "plain");
    }

    #[test]
    fn test_url_decode_rejects_malformed() {
        assert!(matches!(url_decode("%"), Err(ConvertError::Decode(_))));
        assert!(matches!(url_decode("%zz"), Err(ConvertError::Decode(_))));
        assert!(matches!(url_decode("abc%2"), Err(ConvertError::Decode(_))));
        assert!(matches!(url_decode("%FF"), Err(ConvertError::Decode(_))));
    }

    #[test]
    fn test_parse_params() {
        let params = parse_url_params("https://example.com/?q=rust+lang&page=2&page=3").unwrap();
        assert_eq!(params.get("q").map(String::as_str), Some("rust lang"));
        assert_eq!(params.get("page").map(String::as_str), Some("3"));

        assert!(parse_url_params("example.com").unwrap().is_empty());
    }

    #[test]
    fn test_build_url() {
        assert_eq!(
            build_url("example.com/search", &[("q", "a b"), ("n", "1")]).unwrap(),
            "https://example.com/search?q=a+b&n=1"
        );
        assert_eq!(build_url("https://example.com", &[]).unwrap(), "https://example.com/");
    }

    #[test]
    fn test_extract_domain_and_path() {
        assert_eq!(extract_domain("https://www.example.com/a/b").unwrap(), "www.example.com");
        assert_eq!(extract_domain("example.com/a").unwrap(), "example.com");
        assert_eq!(extract_path("https://example.com/a/b?x=1").unwrap(), "/a/b");
        assert_eq!(extract_path("https://example.com").unwrap(), "/");
        assert!(matches!(extract_domain("http://"), Err(ConvertError::InvalidUrl(_))));
    }

    #[test]
    fn test_uppercase_scheme_is_recognized() {
        assert_eq!(extract_domain("HTTPS://EXAMPLE.COM/path").unwrap(), "example.com");
        assert_eq!(extract_path("HTTPS://EXAMPLE.COM/path").unwrap(), "/path");
        assert_eq!(get_url_info("HTTP://example.com").unwrap().protocol, "http");
    }

    #[test]
    fn test_bare_host_starting_with_http() {
        assert_eq!(extract_domain("httpbin.org/get").unwrap(), "httpbin.org");
        assert_eq!(extract_path("httpbin.org/get").unwrap(), "/get");
        assert!(is_valid_url("httpbin.org"));
    }

    #[test]
    fn test_url_info() {
        let info = get_url_info("http://example.com:8080/docs?lang=en#intro").unwrap();
        assert_eq!(info.protocol, "http");
        assert_eq!(info.domain, "example.com");
        assert_eq!(info.path, "/docs");
        assert_eq!(info.params.get("lang").map(String::as_str), Some("en"));
        assert_eq!(info.hash, "intro");
    }

    #[test]
    fn test_is_valid_url() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("example.com"));
        assert!(!is_valid_url("http://"));
        assert!(!is_valid_url("https://exa mple.com"));
    }

    #[test]
    fn test_shorten_url() {
        assert_eq!(shorten_url("https://a.io/x", DEFAULT_SHORTEN_LENGTH), "https://a.io/x");

        let long = "https://example.com/a/very/long/path/that/keeps/going/and/going/forever.html";
        let short = shorten_url(long, 40);
        assert!(short.starts_with("example.com/..."));
        assert!(short.ends_with("forever.html"));
        // 11 (domain) + 4 ("/...") + 40 - 11 - 6
        assert_eq!(short.chars().count(), 38);

        let input = "https://example.com/abc?query=aaaaaaaaaaaaaaaa";
        assert_eq!(shorten_url(input, 20), "example.com/...abc");
        assert_eq!(shorten_url(input, 12), "example.c...");
    }

    #[test]
    fn test_shorten_unparseable_url() {
        let input = "http://[not a url at all, but long]";
        assert_eq!(shorten_url(input, 10), "http://...");
    }
}
