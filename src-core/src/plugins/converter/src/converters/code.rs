//! 结构化数据转换（JSON / YAML / CSV）
//!
//! 所有函数对合法输入是全函数；非法输入返回带格式名的错误，不做静默兜底。

use serde_json::{Map, Value};
use snipwise_common::{ConvertError, ConvertResult};

fn parse_json(input: &str) -> ConvertResult<Value> {
    serde_json::from_str(input).map_err(|e| ConvertError::InvalidJson(e.to_string()))
}

fn to_pretty(value: &Value) -> ConvertResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| ConvertError::InvalidJson(e.to_string()))
}

/// YAML 映射键转为 JSON 键
fn yaml_key_to_string(key: serde_yaml::Value) -> ConvertResult<String> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Null => Ok("null".to_string()),
        serde_yaml::Value::Tagged(tagged) => yaml_key_to_string(tagged.value),
        serde_yaml::Value::Sequence(_) | serde_yaml::Value::Mapping(_) => Err(
            ConvertError::InvalidYaml("complex mapping keys cannot be represented in JSON".to_string()),
        ),
    }
}

/// YAML 值转为 JSON 值
///
/// 非有限浮点数（.nan / .inf）在 JSON 中没有表示，转为 null
fn yaml_to_json_value(value: serde_yaml::Value) -> ConvertResult<Value> {
    Ok(match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json_value)
                .collect::<ConvertResult<Vec<_>>>()?,
        ),
        serde_yaml::Value::Mapping(mapping) => {
            let mut object = Map::new();
            for (key, value) in mapping {
                object.insert(yaml_key_to_string(key)?, yaml_to_json_value(value)?);
            }
            Value::Object(object)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(tagged.value)?,
    })
}

/// JSON 转 YAML（2 空格缩进，不折行）
pub fn json_to_yaml(input: &str) -> ConvertResult<String> {
    let parsed = parse_json(input)?;
    serde_yaml::to_string(&parsed).map_err(|e| ConvertError::InvalidJson(e.to_string()))
}

/// YAML 转 JSON（2 空格缩进）
pub fn yaml_to_json(input: &str) -> ConvertResult<String> {
    let parsed: serde_yaml::Value =
        serde_yaml::from_str(input).map_err(|e| ConvertError::InvalidYaml(e.to_string()))?;
    to_pretty(&yaml_to_json_value(parsed)?)
}

/// JSON 格式化（保留键顺序）
pub fn beautify_json(input: &str) -> ConvertResult<String> {
    to_pretty(&parse_json(input)?)
}

/// JSON 压缩
pub fn minify_json(input: &str) -> ConvertResult<String> {
    let parsed = parse_json(input)?;
    serde_json::to_string(&parsed).map_err(|e| ConvertError::InvalidJson(e.to_string()))
}

/// 递归排序对象键，数组保持元素顺序
fn sort_object_keys(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(sort_object_keys).collect()),
        Value::Object(object) => {
            let mut entries: Vec<(String, Value)> = object.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, sort_object_keys(value)))
                    .collect(),
            )
        }
        other => other,
    }
}

/// JSON 键排序
pub fn sort_json_keys(input: &str) -> ConvertResult<String> {
    to_pretty(&sort_object_keys(parse_json(input)?))
}

/// 单元格文本：null → 空，字符串原样，嵌套结构为紧凑 JSON
fn csv_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(nested) => nested.to_string(),
    }
}

/// 含逗号、引号或换行的单元格加引号，内部引号加倍
fn escape_csv_cell(cell: String) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell
    }
}

/// JSON 数组转 CSV
///
/// 表头取第一个元素的键（不合并其它元素的键）
pub fn json_to_csv(input: &str) -> ConvertResult<String> {
    let parsed = parse_json(input)?;

    let rows = match parsed {
        Value::Array(items) if !items.is_empty() => items,
        _ => {
            return Err(ConvertError::InvalidJson(
                "JSON must be an array of objects".to_string(),
            ))
        }
    };

    let mut objects = Vec::with_capacity(rows.len());
    for row in &rows {
        match row {
            Value::Object(object) => objects.push(object),
            _ => {
                return Err(ConvertError::InvalidJson(
                    "JSON must be an array of objects".to_string(),
                ))
            }
        }
    }

    let headers: Vec<&String> = objects[0].keys().collect();
    let mut lines = Vec::with_capacity(objects.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|h| escape_csv_cell((*h).clone()))
            .collect::<Vec<_>>()
            .join(","),
    );

    for object in &objects {
        let cells: Vec<String> = headers
            .iter()
            .map(|header| escape_csv_cell(csv_cell(object.get(header.as_str()))))
            .collect();
        lines.push(cells.join(","));
    }

    Ok(lines.join("\n"))
}

/// 解析单行 CSV，支持引号包裹的逗号与 `""` 转义
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }

    fields.push(current);
    fields
}

/// CSV 转 JSON
///
/// 第一行为表头；缺失的尾部字段补空字符串
pub fn csv_to_json(input: &str) -> ConvertResult<String> {
    let lines: Vec<&str> = input
        .trim()
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    if lines.len() < 2 {
        return Err(ConvertError::InvalidCsv(
            "CSV must have at least a header and one data row".to_string(),
        ));
    }

    let headers = parse_csv_line(lines[0]);
    let rows: Vec<Value> = lines[1..]
        .iter()
        .map(|line| {
            let values = parse_csv_line(line);
            let mut object = Map::new();
            for (index, header) in headers.iter().enumerate() {
                let value = values.get(index).cloned().unwrap_or_default();
                object.insert(header.clone(), Value::String(value));
            }
            Value::Object(object)
        })
        .collect();

    to_pretty(&Value::Array(rows))
}

/// 根据内容探测可用的结构化转换（仅供 UI 参考，不是严格分类）
pub fn get_code_conversions(content: &str) -> Vec<&'static str> {
    let mut conversions: Vec<&'static str> = Vec::new();

    if let Ok(parsed) = serde_json::from_str::<Value>(content) {
        conversions.extend(["json-to-yaml", "beautify-json", "minify-json", "sort-json-keys"]);

        if let Value::Array(items) = &parsed {
            if items.first().is_some_and(Value::is_object) {
                conversions.push("json-to-csv");
            }
        }
    }

    if let Ok(parsed) = serde_yaml::from_str::<serde_yaml::Value>(content) {
        if parsed.is_mapping() || parsed.is_sequence() {
            conversions.push("yaml-to-json");
        }
    }

    let lines: Vec<&str> = content.trim().split('\n').collect();
    if lines.len() >= 2 && lines[0].contains(',') {
        conversions.push("csv-to-json");
    }

    let mut seen = std::collections::HashSet::new();
    conversions.retain(|id| seen.insert(*id));
    conversions
}
