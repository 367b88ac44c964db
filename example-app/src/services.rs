//! 示例服务

use di_macros::Reflect;
use std::sync::Arc;

/// 问候服务
pub trait Greeter: Send + Sync {
    /// 生成问候语
    fn greet(&self, name: &str) -> String;
}

/// 使用配置的问候语
///
/// @param String $greeting "config.greeting.text"
#[derive(Reflect)]
pub struct ConfiguredGreeter {
    greeting: String,
}

impl Greeter for ConfiguredGreeter {
    fn greet(&self, name: &str) -> String {
        format!("{}，{}", self.greeting, name)
    }
}

/// 邮件撰写
///
/// @param Greeter $greeter
/// @param String  $signature "config.signature"
#[derive(Reflect)]
pub struct Mailer {
    greeter: Arc<dyn Greeter>,
    #[reflect(default)]
    signature: String,
}

impl Mailer {
    /// 撰写一封简短的邮件
    pub fn compose(&self, to: &str) -> String {
        if self.signature.is_empty() {
            return self.greeter.greet(to);
        }
        format!("{}\n  ({})", self.greeter.greet(to), self.signature)
    }
}
