//! 反射派生宏实现

use crate::utils::{classify_type, doc_comment, Access};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Error, Field, Fields, LitStr, Result};

/// 结构体上的 `#[reflect(...)]` 参数
#[derive(Default)]
struct ReflectArgs {
    /// 自定义类型名称
    name: Option<String>,
}

impl ReflectArgs {
    fn from_input(input: &DeriveInput) -> Result<Self> {
        let mut args = Self::default();

        for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("reflect")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    args.name = Some(value.value());
                    Ok(())
                } else {
                    Err(meta.error("未知的 reflect 参数，支持: name"))
                }
            })?;
        }

        Ok(args)
    }
}

/// 字段上是否有 `#[reflect(default)]`
fn has_default(field: &Field) -> Result<bool> {
    let mut default = false;

    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("reflect")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("default") {
                default = true;
                Ok(())
            } else {
                Err(meta.error("未知的 reflect 字段参数，支持: default"))
            }
        })?;
    }

    Ok(default)
}

/// 单个构造参数的生成结果
struct Parameter {
    /// `ParameterInfo` 表达式
    info: TokenStream2,
    /// 从 `args` 取值的表达式
    value: TokenStream2,
}

fn parameter(field: &Field, position: usize, name: &str) -> Result<Parameter> {
    let field_type = classify_type(&field.ty);
    let defaulted = has_default(field)?;
    let optional = field_type.is_optional || defaulted;

    let declared_type = &field_type.declared_type;
    let is_builtin = field_type.is_builtin;
    let optional_call = optional.then(|| quote!(.optional()));
    let info = quote! {
        ::di_abstractions::ParameterInfo::new(#name)
            .with_declared_type(#declared_type, #is_builtin)
            #optional_call
    };

    let target = &field_type.target;
    let value = match (field_type.access, field_type.is_optional, defaulted) {
        (Access::Shared, true, _) => quote!(args.optional_shared::<#target>(#position)?),
        (Access::Cloned, true, _) => quote!(args.optional_cloned::<#target>(#position)?),
        (Access::Shared, false, true) => {
            quote!(args.optional_shared::<#target>(#position)?.unwrap_or_default())
        }
        (Access::Cloned, false, true) => {
            quote!(args.optional_cloned::<#target>(#position)?.unwrap_or_default())
        }
        (Access::Shared, false, false) => quote!(args.shared::<#target>(#position)?),
        (Access::Cloned, false, false) => quote!(args.cloned::<#target>(#position)?),
    };

    Ok(Parameter { info, value })
}

fn expand(input: &DeriveInput) -> Result<TokenStream2> {
    let ident = &input.ident;

    let Data::Struct(data) = &input.data else {
        return Err(Error::new_spanned(ident, "Reflect 只能用于结构体"));
    };

    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "Reflect 不支持泛型结构体",
        ));
    }

    let args = ReflectArgs::from_input(input)?;
    let type_name = args.name.unwrap_or_else(|| ident.to_string());

    let (metadata, construct) = match &data.fields {
        Fields::Unit => (
            quote!(::di_abstractions::TypeMetadata::new(#type_name)),
            quote!(Self),
        ),
        Fields::Named(named) => {
            let mut infos = Vec::new();
            let mut inits = Vec::new();

            for (position, field) in named.named.iter().enumerate() {
                let Some(field_ident) = &field.ident else {
                    return Err(Error::new_spanned(field, "字段缺少名称"));
                };
                let Parameter { info, value } =
                    parameter(field, position, &field_ident.to_string())?;
                infos.push(info);
                inits.push(quote!(#field_ident: #value));
            }

            (
                constructor_metadata(input, &type_name, &infos),
                quote!(Self { #(#inits),* }),
            )
        }
        Fields::Unnamed(unnamed) => {
            let mut infos = Vec::new();
            let mut values = Vec::new();

            for (position, field) in unnamed.unnamed.iter().enumerate() {
                let Parameter { info, value } = parameter(field, position, &position.to_string())?;
                infos.push(info);
                values.push(value);
            }

            (
                constructor_metadata(input, &type_name, &infos),
                quote!(Self(#(#values),*)),
            )
        }
    };

    Ok(quote! {
        impl ::di_abstractions::Reflect for #ident {
            fn type_metadata() -> ::di_abstractions::TypeMetadata {
                #metadata
            }

            #[allow(unused_variables)]
            fn construct(
                args: ::di_abstractions::Arguments,
            ) -> ::di_abstractions::DependencyResult<Self> {
                ::core::result::Result::Ok(#construct)
            }
        }
    })
}

fn constructor_metadata(input: &DeriveInput, type_name: &str, infos: &[TokenStream2]) -> TokenStream2 {
    let doc_call = doc_comment(&input.attrs).map(|doc| quote!(.with_doc(#doc)));

    quote! {
        ::di_abstractions::TypeMetadata::new(#type_name).with_constructor(
            ::di_abstractions::ConstructorInfo::new()
                #doc_call
                #(.with_parameter(#infos))*
        )
    }
}

/// 生成 `Reflect` 实现
pub fn derive_reflect_impl(input: DeriveInput) -> TokenStream {
    match expand(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn expand_to_string(input: DeriveInput) -> String {
        expand(&input).map(|tokens| tokens.to_string()).unwrap_or_else(|e| e.to_string())
    }

    #[test]
    fn test_named_fields() {
        let expanded = expand_to_string(parse_quote! {
            struct Paint {
                color: Arc<dyn Color>,
                #[reflect(default)]
                hue: u8,
            }
        });

        assert!(expanded.contains("TypeMetadata :: new (\"Paint\")"));
        assert!(expanded.contains("with_declared_type (\"Color\" , false)"));
        assert!(expanded.contains("with_declared_type (\"u8\" , true) . optional ()"));
        assert!(expanded.contains("unwrap_or_default ()"));
        assert!(!expanded.contains("with_doc"));
    }

    #[test]
    fn test_custom_name_and_doc() {
        let expanded = expand_to_string(parse_quote! {
            /// @param u8 $hue "config.hue"
            #[reflect(name = "Tint")]
            struct Hue(u8);
        });

        assert!(expanded.contains("TypeMetadata :: new (\"Tint\")"));
        assert!(expanded.contains("with_doc"));
        assert!(expanded.contains("ParameterInfo :: new (\"0\")"));
    }

    #[test]
    fn test_unit_struct() {
        let expanded = expand_to_string(parse_quote!(struct Marker;));

        assert!(!expanded.contains("with_constructor"));
        assert!(expanded.contains("Ok (Self)"));
    }

    #[test]
    fn test_rejects_enum() {
        let expanded = expand_to_string(parse_quote!(enum Color { Red }));
        assert_eq!(expanded, "Reflect 只能用于结构体");
    }

    #[test]
    fn test_rejects_generics() {
        let expanded = expand_to_string(parse_quote!(struct Holder<T> { value: T }));
        assert_eq!(expanded, "Reflect 不支持泛型结构体");
    }

    #[test]
    fn test_rejects_unknown_argument() {
        let expanded = expand_to_string(parse_quote! {
            #[reflect(singleton)]
            struct Paint;
        });
        assert!(expanded.starts_with("未知的 reflect 参数"));
    }
}
