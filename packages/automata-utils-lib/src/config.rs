use serde::{Deserialize, Serialize};

use crate::logger::LogLevel;

/// Declares a configuration struct that can be read from a TOML file in
/// which every field is optional. Missing fields take the given default.
///
/// For every field `x` this generates `with_x`, `set_x` and `get_x`.
macro_rules! config {
    (
        $vis:vis struct $name:ident {
            $( $field:ident : $ty:ty = $default:expr ),* $(,)?
        }
    ) => {
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(default)]
        $vis struct $name {
            $( $field: $ty, )*
        }

        impl Default for $name {
            fn default() -> Self {
                $name {
                    $( $field: $default, )*
                }
            }
        }

        paste::paste! {
            impl $name {
                pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
                    Ok(toml::from_str(content)?)
                }

                pub fn from_file<P: AsRef<std::path::Path>>(file_path: P) -> anyhow::Result<Self> {
                    use anyhow::Context;

                    let file_path = file_path.as_ref();
                    let content = std::fs::read_to_string(file_path).with_context(|| {
                        format!("failed to read config file {}", file_path.display())
                    })?;
                    Self::from_toml_str(&content)
                        .with_context(|| format!("invalid config file {}", file_path.display()))
                }

                pub fn from_optional_file<P: AsRef<std::path::Path>>(
                    file_path: Option<P>,
                ) -> anyhow::Result<Self> {
                    match file_path {
                        Some(p) => Self::from_file(p),
                        None => Ok(Self::default()),
                    }
                }

                $(
                    pub fn [<with_ $field>](mut self, $field: $ty) -> Self {
                        self.$field = $field;
                        self
                    }

                    pub fn [<set_ $field>](&mut self, $field: $ty) {
                        self.$field = $field;
                    }

                    pub fn [<get_ $field>](&self) -> &$ty {
                        &self.$field
                    }
                )*
            }
        }
    };
}

config! {
    pub struct LoggerConfig {
        enabled: bool = false,
        log_file: bool = false,
        log_level: LogLevel = LogLevel::Warn,
    }
}

/// How the subset construction decides that two sets of NFA states are the
/// same DFA state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetaStateKeyMode {
    /// Compare the membership vectors themselves.
    Members,
    /// Compare only a 64 bit hash of the membership vectors. Two different
    /// sets with the same hash are merged into one DFA state.
    Digest,
}

config! {
    pub struct DeterminizeConfig {
        meta_state_key: MetaStateKeyMode = MetaStateKeyMode::Members,
    }
}

config! {
    pub struct AutomataConfig {
        logger: LoggerConfig = LoggerConfig::default(),
        determinize: DeterminizeConfig = DeterminizeConfig::default(),
    }
}
