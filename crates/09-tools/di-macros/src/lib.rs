//! # DI Macros
//!
//! 提供 `#[derive(Reflect)]`，在编译期生成自动装配所需的构造函数元数据。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use di_macros::Reflect;
//! use std::sync::Arc;
//!
//! pub trait Color: Send + Sync {}
//!
//! /// 调色板
//! ///
//! /// @param Color $primary "palette.primary"
//! #[derive(Reflect)]
//! pub struct Palette {
//!     primary: Arc<dyn Color>,
//!     #[reflect(default)]
//!     alpha: Option<u8>,
//! }
//! ```
//!
//! 生成的代码只引用 `::di_abstractions`，使用方需要依赖该 crate。

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod reflect;
mod utils;

/// 反射派生宏
///
/// 为结构体实现 `di_abstractions::Reflect`。字段按声明顺序成为构造函数参数，
/// 结构体的文档注释成为构造函数文档，其中的 `@param` 注解可以覆盖依赖标识符。
///
/// # 字段类型
///
/// - `Arc<dyn Trait>` - 声明类型为 `Trait`
/// - `Arc<T>` - 声明类型为 `T`，共享容器中的实例
/// - `Option<_>` - 可选参数，依赖缺失时为 `None`
/// - 基本类型、`String` 和标准集合 - 内置类型，需要注解才能自动装配
/// - 其他类型 - 声明类型为路径的最后一段，按值克隆
///
/// # 属性
///
/// - `#[reflect(name = "Custom")]` - 结构体上，自定义类型名称
/// - `#[reflect(default)]` - 字段上，视为可选，缺失时使用 `Default`
///
/// # 示例
///
/// ```rust,ignore
/// #[derive(Reflect)]
/// #[reflect(name = "Greeter")]
/// pub struct Greeter {
///     repository: Arc<dyn Repository>,
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    reflect::derive_reflect_impl(input)
}
