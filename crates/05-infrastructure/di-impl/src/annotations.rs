//! 构造函数文档注释中的参数注解
//!
//! 识别形如 `@param Type $name "identifier"` 的标签，类型、参数名和引号内的
//! 标识符都是可选的。只保留引号内的标识符，按标签出现的序号对应构造函数参数。
//!
//! 序号对齐是隐式的：标签少于参数或顺序与参数不同时会错位，这里不做修正。

use once_cell::sync::Lazy;
use regex::Regex;

static PARAM_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"@param(?:\s+([^$"\s]\S*))?(?:\s+\$?(\w+))?(?:\s+"([^"]+)")?"#)
        .expect("参数注解正则无效")
});

/// 提取参数注解
///
/// 返回值按标签序号排列，没有覆盖标识符的标签为 `None`。
pub fn extract_param_annotations(doc: &str) -> Vec<Option<String>> {
    PARAM_TAG
        .captures_iter(doc)
        .map(|captures| captures.get(3).map(|m| m.as_str().to_string()))
        .collect()
}
