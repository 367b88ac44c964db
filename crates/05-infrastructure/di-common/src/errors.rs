//! 错误类型定义

use thiserror::Error;

/// 依赖注入错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("条目 \"{identifier}\" 未定义")]
    NotFound { identifier: String },

    #[error("条目 \"{identifier}\" 不是可委托的容器")]
    NoSubContainer { identifier: String },

    #[error("条目 \"{identifier}\" 是 {actual}，未实现 {expected}")]
    TypeMismatch {
        identifier: String,
        expected: String,
        actual: String,
    },

    #[error(transparent)]
    Autowire(#[from] AutowireError),

    #[error("构造 {type_name} 失败: 第 {position} 个参数应为 {expected}, 实际为 {actual}")]
    InvalidArgument {
        type_name: String,
        position: usize,
        expected: String,
        actual: String,
    },
}

impl DependencyError {
    /// 创建未找到错误
    pub fn not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            identifier: identifier.into(),
        }
    }

    /// 是否为未找到错误
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// 自动装配错误类型
#[derive(Error, Debug)]
pub enum AutowireError {
    #[error("无法自动装配 {type_name}: {source}")]
    Reflection {
        type_name: String,
        #[source]
        source: ReflectionError,
    },

    #[error("无法自动装配 {type_name}: 参数 '{parameter}' 的类型未知")]
    UnknownParameterType { type_name: String, parameter: String },

    #[error(
        "无法自动装配 {type_name}: 参数 '{parameter}' 的内置类型 '{declared_type}' 不能用作容器标识符，请使用注解"
    )]
    BuiltinParameterType {
        type_name: String,
        parameter: String,
        declared_type: String,
    },
}

/// 反射错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReflectionError {
    #[error("类型 {type_name} 不存在")]
    UnknownType { type_name: String },
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },
}

/// 结果类型别名
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autowire_error_wraps_reflection_cause() {
        let error: DependencyError = AutowireError::Reflection {
            type_name: "Foo".to_string(),
            source: ReflectionError::UnknownType {
                type_name: "Foo".to_string(),
            },
        }
        .into();

        assert_eq!(error.to_string(), "无法自动装配 Foo: 类型 Foo 不存在");
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_builtin_message_names_parameter() {
        let error = AutowireError::BuiltinParameterType {
            type_name: "Foo".to_string(),
            parameter: "color".to_string(),
            declared_type: "String".to_string(),
        };

        let message = error.to_string();
        assert!(message.contains("'color'"));
        assert!(message.contains("'String'"));
    }

    #[test]
    fn test_is_not_found() {
        assert!(DependencyError::not_found("foo").is_not_found());
        assert!(!DependencyError::NoSubContainer {
            identifier: "foo".to_string()
        }
        .is_not_found());
    }
}
