use core::fmt::{Display, Formatter};
use core::str::FromStr;
use std::path::Path;

use marshal_core::{Error, Marshaller, Result, Shape, TypeDescriptor};
#[cfg(feature = "json")]
use marshal_formats::JsonMarshaller;
#[cfg(feature = "msgpack")]
use marshal_formats::MessagePackMarshaller;
use serde::de::DeserializeOwned;
use serde_derive::{Deserialize, Serialize};
use tracing::debug;

/// A marshaller whose wire format is not known at the call site.
pub type BoxedMarshaller<I, O> = Box<dyn Marshaller<Input = I, Output = O> + Send + Sync>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct MarshalConfig {
    pub format: Format,
}

/// Wire formats that can be selected by name.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum Format {
    #[default]
    #[serde(rename = "json")]
    Json,
    #[serde(rename = "msgpack", alias = "messagepack")]
    MessagePack,
}

impl Format {
    /// Builds a marshaller of this format for the shape `S`.
    pub fn marshaller<S>(self) -> Result<BoxedMarshaller<S::Value, S::Output>>
    where
        S: Shape + 'static,
        S::Value: serde::Serialize + DeserializeOwned + 'static,
    {
        let descriptor = TypeDescriptor::<S>::new();
        debug!(
            "building {} marshaller for {}",
            self,
            descriptor.type_name()
        );

        match self {
            #[cfg(feature = "json")]
            Self::Json => Ok(Box::new(JsonMarshaller::new(descriptor)?)),
            #[cfg(feature = "msgpack")]
            Self::MessagePack => Ok(Box::new(MessagePackMarshaller::new(descriptor)?)),
            #[allow(unreachable_patterns)]
            _ => Err(Error::Config {
                reason: format!("{} support is not enabled", self),
            }),
        }
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::MessagePack => write!(f, "msgpack"),
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "msgpack" | "messagepack" => Ok(Self::MessagePack),
            _ => Err(Error::Config {
                reason: format!("unknown format `{}`", s),
            }),
        }
    }
}

impl MarshalConfig {
    pub fn marshaller<S>(&self) -> Result<BoxedMarshaller<S::Value, S::Output>>
    where
        S: Shape + 'static,
        S::Value: serde::Serialize + DeserializeOwned + 'static,
    {
        self.format.marshaller::<S>()
    }
}

/// Parse a TOML document as a `MarshalConfig`.
pub fn parse_config(config_toml: &str) -> Result<MarshalConfig> {
    toml::from_str::<MarshalConfig>(config_toml).map_err(|e| Error::Config {
        reason: e.to_string(),
    })
}

/// Attempt to load and parse the TOML config file as a `MarshalConfig`.
pub fn load_config(path: impl AsRef<Path>) -> Result<MarshalConfig> {
    let config_toml = std::fs::read_to_string(&path).map_err(|e| Error::Config {
        reason: e.to_string(),
    })?;

    let config = parse_config(&config_toml[..])?;
    debug!(
        "loaded marshal config from {}: {:?}",
        path.as_ref().display(),
        config
    );

    Ok(config)
}
