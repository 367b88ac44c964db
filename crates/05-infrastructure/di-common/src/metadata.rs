//! 元数据定义
//!
//! 描述一个类型的主构造函数：参数列表与文档注释。

/// 构造函数参数信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterInfo {
    /// 参数名称
    pub name: String,
    /// 声明类型名称
    pub declared_type: Option<String>,
    /// 声明类型是否为内置类型（标量、字符串、数组等）
    pub is_builtin: bool,
    /// 是否可选（可为空或有默认值）
    pub is_optional: bool,
}

impl ParameterInfo {
    /// 创建无类型信息的参数
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: None,
            is_builtin: false,
            is_optional: false,
        }
    }

    /// 以类或接口名称声明类型
    pub fn typed(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self::new(name).with_declared_type(declared_type, false)
    }

    /// 以内置类型声明类型
    pub fn builtin(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self::new(name).with_declared_type(declared_type, true)
    }

    /// 设置声明类型
    pub fn with_declared_type(mut self, declared_type: impl Into<String>, is_builtin: bool) -> Self {
        self.declared_type = Some(declared_type.into());
        self.is_builtin = is_builtin;
        self
    }

    /// 标记为可选
    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }
}

/// 构造函数信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstructorInfo {
    /// 文档注释
    pub doc: Option<String>,
    /// 按声明顺序排列的参数
    pub parameters: Vec<ParameterInfo>,
}

impl ConstructorInfo {
    /// 创建空构造函数信息
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置文档注释
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// 追加参数
    pub fn with_parameter(mut self, parameter: ParameterInfo) -> Self {
        self.parameters.push(parameter);
        self
    }
}

/// 类型元数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMetadata {
    /// 类型名称
    pub name: String,
    /// 主构造函数，没有声明构造函数时为 `None`
    pub constructor: Option<ConstructorInfo>,
}

impl TypeMetadata {
    /// 创建没有构造函数的类型元数据
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constructor: None,
        }
    }

    /// 设置构造函数
    pub fn with_constructor(mut self, constructor: ConstructorInfo) -> Self {
        self.constructor = Some(constructor);
        self
    }

    /// 是否声明了构造函数
    pub fn has_constructor(&self) -> bool {
        self.constructor.is_some()
    }

    /// 构造函数参数，没有构造函数时为空
    pub fn parameters(&self) -> &[ParameterInfo] {
        self.constructor
            .as_ref()
            .map_or(&[], |constructor| constructor.parameters.as_slice())
    }
}
