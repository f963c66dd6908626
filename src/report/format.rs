// ==========================================
// 工具包发布库 - 定宽文本格式化
// ==========================================
// 宽度按字符数计算；超宽内容原样输出，不截断
// ==========================================

use chrono::{NaiveDateTime, Timelike};
use rusqlite::types::Value;

/// 列间分隔
pub const COLUMN_SEPARATOR: &str = " ";

/// 左对齐，右侧补空格
pub fn left_justify(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    format!("{}{}", text, " ".repeat(width - len))
}

/// 居中；剩余空格为奇数时右侧多一个
pub fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let pad = width - len;
    let left = pad / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(pad - left))
}

pub fn dashes(width: usize) -> String {
    "-".repeat(width)
}

/// 首列左对齐，其余列居中
///
/// `widths` 短于 `fields` 时，多出的列按自身长度输出
pub fn format_columns(fields: &[String], widths: &[usize]) -> String {
    fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let width = widths.get(i).copied().unwrap_or(0);
            if i == 0 {
                left_justify(field, width)
            } else {
                center(field, width)
            }
        })
        .collect::<Vec<_>>()
        .join(COLUMN_SEPARATOR)
}

/// 表头两行: 列名 + 短横线
pub fn header_lines(labels: &[&str], widths: &[usize]) -> Vec<String> {
    let label_line = labels
        .iter()
        .zip(widths.iter())
        .map(|(label, width)| left_justify(label, *width))
        .collect::<Vec<_>>()
        .join(COLUMN_SEPARATOR);
    let dash_line = widths
        .iter()
        .map(|w| dashes(*w))
        .collect::<Vec<_>>()
        .join(COLUMN_SEPARATOR);
    vec![label_line, dash_line]
}

/// 时间戳的默认文本形式: `YYYY-MM-DD HH:MM:SS.f`
///
/// 小数部分去掉末尾 0，为 0 时输出 `.0`
pub fn timestamp_string(ts: NaiveDateTime) -> String {
    let nanos = ts.nanosecond() % 1_000_000_000;
    let fraction = if nanos == 0 {
        "0".to_string()
    } else {
        format!("{:09}", nanos).trim_end_matches('0').to_string()
    };
    format!("{}.{}", ts.format("%Y-%m-%d %H:%M:%S"), fraction)
}

/// 解析库中以文本存储的时间戳
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
    FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(raw.trim(), f).ok())
}

/// 结果值的文本形式；NULL 输出空串
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s.clone(),
        Value::Blob(b) => format!("<{} bytes>", b.len()),
    }
}

/// 时间戳列的文本形式；无法解析时原样输出
pub fn timestamp_text(value: &Value) -> String {
    match value {
        Value::Text(s) => parse_timestamp(s)
            .map(timestamp_string)
            .unwrap_or_else(|| s.clone()),
        other => value_text(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_justify_and_center() {
        assert_eq!(left_justify("REV1", 10), "REV1      ");
        assert_eq!(center("ab", 6), "  ab  ");
        assert_eq!(center("abc", 6), " abc  ");
        assert_eq!(center("toolong", 3), "toolong");
        assert_eq!(left_justify("工具包", 5), "工具包  ");
    }

    #[test]
    fn test_timestamp_string() {
        let base = NaiveDate::from_ymd_opt(2013, 1, 1).unwrap();
        assert_eq!(
            timestamp_string(base.and_hms_opt(0, 0, 0).unwrap()),
            "2013-01-01 00:00:00.0"
        );
        assert_eq!(
            timestamp_string(base.and_hms_milli_opt(12, 5, 9, 120).unwrap()),
            "2013-01-01 12:05:09.12"
        );
    }

    #[test]
    fn test_timestamp_text_from_stored_value() {
        assert_eq!(
            timestamp_text(&Value::Text("2013-01-01 00:00:00.000".into())),
            "2013-01-01 00:00:00.0"
        );
        assert_eq!(timestamp_text(&Value::Text("yesterday".into())), "yesterday");
        assert_eq!(timestamp_text(&Value::Null), "");
    }

    #[test]
    fn test_header_lines() {
        let lines = header_lines(&["REV", "STATE"], &[5, 7]);
        assert_eq!(lines[0], "REV   STATE  ");
        assert_eq!(lines[1], "----- -------");
    }
}
