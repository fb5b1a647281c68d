//! 字符串枚举宏
//!
//! 数据库中以字符串保存、接口中以 snake_case 字符串传输的枚举统一由此宏生成，
//! 同时实现 `Display`、`FromStr` 以及 TS 类型导出。

#[macro_export]
macro_rules! define_string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $export:literal {
            $($variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            serde::Serialize,
            serde::Deserialize,
            ts_rs::TS,
        )]
        #[ts(export, export_to = $export)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    _ => Err(format!(
                        "Invalid {}: '{}'. Supported values: {}",
                        stringify!($name),
                        s,
                        [$($value),+].join(", ")
                    )),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    crate::define_string_enum! {
        /// 测试用枚举
        Light, "../admin/src/types/generated/test.ts" {
            Red => "red",
            AmberFlash => "amber_flash",
        }
    }

    #[test]
    fn test_round_trip_through_str() {
        assert_eq!(Light::AmberFlash.as_str(), "amber_flash");
        assert_eq!("red".parse::<Light>(), Ok(Light::Red));
        assert_eq!(Light::ALL.len(), 2);
    }

    #[test]
    fn test_invalid_value_lists_supported() {
        let err = "green".parse::<Light>().unwrap_err();
        assert!(err.contains("red, amber_flash"));
    }

    #[test]
    fn test_serde_uses_snake_case_values() {
        assert_eq!(
            serde_json::to_string(&Light::AmberFlash).unwrap(),
            "\"amber_flash\""
        );
        let parsed: Light = serde_json::from_str("\"red\"").unwrap();
        assert_eq!(parsed, Light::Red);
    }
}
