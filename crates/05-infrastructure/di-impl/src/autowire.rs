//! 基于反射元数据和注解的自动装配

use crate::annotations::extract_param_annotations;
use di_abstractions::{
    factory, Autowire, DependencyDescriptor, Factory, MetadataProvider, Resolver, ResolverExt,
};
use di_common::{
    AutowireError, DependencyResult, Instance, ParameterInfo, TypeMetadata,
};
use std::sync::Arc;
use tracing::debug;

/// 反射自动装配
///
/// 依赖标识符的优先级：参数位置上的注解覆盖值，其次是参数的声明类型名。
pub struct ReflectionAutowire {
    provider: Arc<dyn MetadataProvider>,
}

impl ReflectionAutowire {
    /// 以元数据提供者创建
    pub fn new(provider: Arc<dyn MetadataProvider>) -> Self {
        Self { provider }
    }

    /// 计算构造函数依赖，跳过前 `skip` 个由调用方显式提供的参数
    pub fn determine_dependencies(
        &self,
        metadata: &TypeMetadata,
        skip: usize,
    ) -> Result<Vec<DependencyDescriptor>, AutowireError> {
        let Some(constructor) = &metadata.constructor else {
            return Ok(Vec::new());
        };

        let annotations = constructor
            .doc
            .as_deref()
            .map(extract_param_annotations)
            .unwrap_or_default();

        constructor
            .parameters
            .iter()
            .enumerate()
            .skip(skip)
            .map(|(index, parameter)| {
                let key = match annotations.get(index).cloned().flatten() {
                    Some(key) => key,
                    None => parameter_type(&metadata.name, parameter)?,
                };

                Ok(DependencyDescriptor {
                    key,
                    optional: parameter.is_optional,
                })
            })
            .collect()
    }

    /// 从容器取得依赖，可选依赖缺失时为 `None`
    pub fn get_dependencies(
        &self,
        container: &dyn Resolver,
        descriptors: &[DependencyDescriptor],
    ) -> DependencyResult<Vec<Option<Instance>>> {
        descriptors
            .iter()
            .map(|descriptor| {
                if !descriptor.optional || container.has(&descriptor.key) {
                    container.get(&descriptor.key).map(Some)
                } else {
                    debug!("可选依赖 {} 不存在，以空值注入", descriptor.key);
                    Ok(None)
                }
            })
            .collect()
    }
}

impl Autowire for ReflectionAutowire {
    fn instantiate(
        &self,
        container: &dyn Resolver,
        type_name: &str,
        args: Vec<Instance>,
    ) -> DependencyResult<Instance> {
        let reflected = self
            .provider
            .reflect(type_name)
            .map_err(|source| AutowireError::Reflection {
                type_name: type_name.to_string(),
                source,
            })?;

        let descriptors = self.determine_dependencies(&reflected.metadata, args.len())?;
        debug!(
            "{} 的依赖: {:?}",
            type_name,
            descriptors.iter().map(|d| d.key.as_str()).collect::<Vec<_>>()
        );

        let dependencies = self.get_dependencies(container, &descriptors)?;
        let values = args.into_iter().map(Some).chain(dependencies).collect();

        reflected.construct(values)
    }
}

/// 参数的声明类型作为容器标识符
fn parameter_type(type_name: &str, parameter: &ParameterInfo) -> Result<String, AutowireError> {
    let Some(declared_type) = &parameter.declared_type else {
        return Err(AutowireError::UnknownParameterType {
            type_name: type_name.to_string(),
            parameter: parameter.name.clone(),
        });
    };

    if parameter.is_builtin {
        return Err(AutowireError::BuiltinParameterType {
            type_name: type_name.to_string(),
            parameter: parameter.name.clone(),
            declared_type: declared_type.clone(),
        });
    }

    Ok(declared_type.clone())
}

/// 取得自动装配条目
pub fn resolve_autowire(
    container: &dyn Resolver,
    autowire_id: &str,
) -> DependencyResult<Arc<dyn Autowire>> {
    container.get_cloned::<Arc<dyn Autowire>>(autowire_id)
}

/// 创建标准的自动装配条目工厂
pub fn autowire_factory(provider: Arc<dyn MetadataProvider>) -> Factory {
    factory(move |_| {
        let autowire: Arc<dyn Autowire> = Arc::new(ReflectionAutowire::new(Arc::clone(&provider)));
        Ok(Instance::new(autowire))
    })
}
