//! 宏工具函数

use quote::ToTokens;
use syn::{Attribute, Expr, ExprLit, GenericArgument, Lit, Meta, PathArguments, Type, TypeParamBound};

/// 不能直接作为容器标识符的内置类型
const BUILTIN_TYPES: &[&str] = &[
    "bool", "char", "str", "String", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16",
    "u32", "u64", "u128", "usize", "f32", "f64", "Vec", "VecDeque", "HashMap", "BTreeMap",
    "HashSet", "BTreeSet",
];

/// 构造时取得参数的方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// `Arc<T>` 字段，共享容器中的实例
    Shared,
    /// 其他字段，克隆容器中的值
    Cloned,
}

/// 字段类型分析结果
#[derive(Clone)]
pub struct FieldType {
    /// 声明类型名称
    pub declared_type: String,
    pub is_builtin: bool,
    pub is_optional: bool,
    pub access: Access,
    /// 从参数中取出的类型
    pub target: Type,
}

/// 分析字段类型
pub fn classify_type(ty: &Type) -> FieldType {
    let ty = strip_group(ty);
    match generic_inner(ty, "Option") {
        Some(inner) => FieldType {
            is_optional: true,
            ..classify_required(inner)
        },
        None => classify_required(ty),
    }
}

fn classify_required(ty: &Type) -> FieldType {
    let ty = strip_group(ty);

    if let Some(inner) = generic_inner(ty, "Arc") {
        let inner = strip_group(inner);
        match inner {
            Type::TraitObject(object) => {
                if let Some(name) = trait_name(object.bounds.iter()) {
                    return cloned(name, false, ty);
                }
            }
            Type::Path(_) => {
                let (name, is_builtin) = path_name(inner);
                if !is_builtin {
                    return FieldType {
                        declared_type: name,
                        is_builtin,
                        is_optional: false,
                        access: Access::Shared,
                        target: inner.clone(),
                    };
                }
                return cloned(name, true, ty);
            }
            _ => {}
        }
    }

    let (name, is_builtin) = path_name(ty);
    cloned(name, is_builtin, ty)
}

fn cloned(declared_type: String, is_builtin: bool, ty: &Type) -> FieldType {
    FieldType {
        declared_type,
        is_builtin,
        is_optional: false,
        access: Access::Cloned,
        target: ty.clone(),
    }
}

/// 路径类型取最后一段；元组、数组等按内置类型处理
fn path_name(ty: &Type) -> (String, bool) {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => {
            match type_path.path.segments.last() {
                Some(segment) => {
                    let name = segment.ident.to_string();
                    let is_builtin = BUILTIN_TYPES.contains(&name.as_str());
                    (name, is_builtin)
                }
                None => (ty.to_token_stream().to_string(), true),
            }
        }
        _ => (ty.to_token_stream().to_string(), true),
    }
}

/// trait 对象的主 trait 名称，忽略 `Send`、`Sync` 等标记
fn trait_name<'a>(bounds: impl Iterator<Item = &'a TypeParamBound>) -> Option<String> {
    bounds
        .filter_map(|bound| match bound {
            TypeParamBound::Trait(trait_bound) => trait_bound.path.segments.last(),
            _ => None,
        })
        .map(|segment| segment.ident.to_string())
        .find(|name| !matches!(name.as_str(), "Send" | "Sync" | "Unpin"))
}

/// 取出 `Name<T>` 中的 `T`
fn generic_inner<'a>(ty: &'a Type, name: &str) -> Option<&'a Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != name {
        return None;
    }

    match &segment.arguments {
        PathArguments::AngleBracketed(args) => match args.args.first() {
            Some(GenericArgument::Type(inner)) => Some(inner),
            _ => None,
        },
        _ => None,
    }
}

fn strip_group(ty: &Type) -> &Type {
    match ty {
        Type::Group(group) => strip_group(&group.elem),
        Type::Paren(paren) => strip_group(&paren.elem),
        _ => ty,
    }
}

/// 合并文档注释，每个 `#[doc]` 一行
pub fn doc_comment(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(lit_str),
                    ..
                }) => Some(lit_str.value()),
                _ => None,
            },
            _ => None,
        })
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}
