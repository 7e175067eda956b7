//! Read-only model of an AsyncAPI 2.x document.
//!
//! Only the parts of the document that the page needs are modeled: the info block with its
//! extensions, the ordered channel map with publish and subscribe operations, and the external
//! documentation link. Everything else in the source document is ignored on load.

use std::{
    collections::BTreeMap,
    fmt::{self, Display},
    fs,
    path::Path,
};

use semver::Version;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, DeserializeOwned, MapAccess, Visitor},
    ser::SerializeMap,
};
use serde_json::Value;
use tracing::debug;

use crate::error::{AsyncPageError, Result};

/// AsyncAPI version stamped on documents built in code.
pub const DEFAULT_ASYNCAPI_VERSION: &str = "2.6.0";

/// Prefix shared by all specification extension keys.
const EXTENSION_PREFIX: &str = "x-";

/// A parsed AsyncAPI document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Declared AsyncAPI specification version.
    asyncapi: String,
    /// General information about the API.
    info: Info,
    /// Channels in document order.
    #[serde(default)]
    channels: Channels,
    /// Optional pointer to external documentation.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    external_docs: Option<ExternalDocs>,
}

impl Document {
    /// Create an empty document with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            asyncapi: DEFAULT_ASYNCAPI_VERSION.to_string(),
            info: Info::new(title),
            channels: Channels::default(),
            external_docs: None,
        }
    }

    /// Append a channel, replacing any existing channel with the same name in place.
    pub fn with_channel(mut self, name: impl Into<String>, channel: Channel) -> Self {
        self.channels.insert(name.into(), channel);
        self
    }

    /// Attach an extension value to the info block.
    pub fn with_extension(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.info.extensions.insert(name.into(), value.into());
        self
    }

    /// Attach an external documentation link.
    pub fn with_external_docs(mut self, url: impl Into<String>) -> Self {
        self.external_docs = Some(ExternalDocs {
            url: url.into(),
            description: None,
        });
        self
    }

    /// Set the info version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.info.version = Some(version.into());
        self
    }

    /// Parse a document from JSON source.
    pub fn from_json(source: &str) -> Result<Self> {
        serde_json::from_str::<Self>(source)?.validated()
    }

    /// Parse a document from YAML source.
    pub fn from_yaml(source: &str) -> Result<Self> {
        serde_yaml::from_str::<Self>(source)?.validated()
    }

    /// Load a document from disk. Files with a `.json` extension are parsed as JSON, anything
    /// else as YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        debug!(path = %path.display(), is_json, "loading document");
        if is_json {
            Self::from_json(&source)
        } else {
            Self::from_yaml(&source)
        }
    }

    /// Check the declared version and drop info fields that are not extensions.
    fn validated(mut self) -> Result<Self> {
        check_version(&self.asyncapi)?;
        self.info
            .extensions
            .retain(|name, _| name.starts_with(EXTENSION_PREFIX));
        Ok(self)
    }

    /// Declared AsyncAPI version string.
    pub fn asyncapi(&self) -> &str {
        &self.asyncapi
    }

    /// The info block.
    pub fn info(&self) -> &Info {
        &self.info
    }

    /// Channels in document order.
    pub fn channels(&self) -> &Channels {
        &self.channels
    }

    /// Whether the document declares at least one channel.
    pub fn has_channels(&self) -> bool {
        !self.channels.is_empty()
    }

    /// External documentation, if declared.
    pub fn external_docs(&self) -> Option<&ExternalDocs> {
        self.external_docs.as_ref()
    }

    /// Pretty-printed JSON of the normalized model.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Parse an AsyncAPI version string, accepting only the 2.x line.
pub fn check_version(raw: &str) -> Result<Version> {
    let version = Version::parse(raw.trim())
        .map_err(|e| AsyncPageError::InvalidVersion(format!("{raw}: {e}")))?;
    if version.major != 2 {
        return Err(AsyncPageError::UnsupportedVersion(raw.to_string()));
    }
    Ok(version)
}

/// General information about the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    /// Human readable API title.
    title: String,
    /// API version, unrelated to the AsyncAPI version.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    version: Option<String>,
    /// Longer description of the API.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    description: Option<String>,
    /// Extensions keyed by name. Loading keeps only `x-` keys.
    #[serde(flatten)]
    extensions: BTreeMap<String, Value>,
}

impl Info {
    /// Create an info block carrying only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: None,
            description: None,
            extensions: BTreeMap::new(),
        }
    }

    /// The API title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The API version, if declared.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// The API description, if declared.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether an extension with this name is declared.
    pub fn has_ext(&self, name: &str) -> bool {
        self.extensions.contains_key(name)
    }

    /// Value of the named extension.
    pub fn ext(&self, name: &str) -> Option<&Value> {
        self.extensions.get(name)
    }

    /// All declared extensions, sorted by name.
    pub fn extensions(&self) -> &BTreeMap<String, Value> {
        &self.extensions
    }
}

/// Link to documentation hosted outside the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalDocs {
    /// Target URL.
    url: String,
    /// Optional description of the target.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    description: Option<String>,
}

impl ExternalDocs {
    /// Target URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Optional description of the target.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Ordered mapping from channel name to channel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Channels(Vec<(String, Channel)>);

impl Channels {
    /// Insert a channel, keeping the position of an existing entry with the same name.
    pub fn insert(&mut self, name: String, channel: Channel) {
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = channel,
            None => self.0.push((name, channel)),
        }
    }

    /// Look up a channel by name.
    pub fn get(&self, name: &str) -> Option<&Channel> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, channel)| channel)
    }

    /// Iterate over `(name, channel)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Channel)> {
        self.0.iter().map(|(name, channel)| (name.as_str(), channel))
    }

    /// Number of channels.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no channels.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Channels {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, channel) in &self.0 {
            map.serialize_entry(name, channel)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Channels {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(ChannelsVisitor)
    }
}

/// Visitor that keeps channels in the order the source lists them.
struct ChannelsVisitor;

impl<'de> Visitor<'de> for ChannelsVisitor {
    type Value = Channels;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map of channel names to channels")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Channels, A::Error> {
        let mut channels = Channels::default();
        while let Some((name, value)) = access.next_entry::<String, Value>()? {
            // A channel that is not a map still counts; it just carries no operations.
            let channel = serde_json::from_value(value).unwrap_or_default();
            channels.insert(name, channel);
        }
        Ok(channels)
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Channels, E> {
        Ok(Channels::default())
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Channels, E> {
        Ok(Channels::default())
    }
}

/// The two operation kinds of an AsyncAPI 2.x channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Consumers may subscribe; the application sends messages to the channel.
    Subscribe,
    /// Consumers may publish; the application receives messages from the channel.
    Publish,
}

impl OperationKind {
    /// Lowercase keyword used in documents and rendered text.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Subscribe => "subscribe",
            Self::Publish => "publish",
        }
    }
}

impl Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named communication path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    /// Optional channel description.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    description: Option<String>,
    /// Subscribe operations.
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    subscribe: Vec<Operation>,
    /// Publish operations.
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    publish: Vec<Operation>,
}

impl Channel {
    /// Create a channel without operations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the channel description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a subscribe operation.
    pub fn with_subscribe(mut self, operation: Operation) -> Self {
        self.subscribe.push(operation);
        self
    }

    /// Add a publish operation.
    pub fn with_publish(mut self, operation: Operation) -> Self {
        self.publish.push(operation);
        self
    }

    /// Channel description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Subscribe operations in declaration order.
    pub fn subscribe(&self) -> &[Operation] {
        &self.subscribe
    }

    /// Publish operations in declaration order.
    pub fn publish(&self) -> &[Operation] {
        &self.publish
    }

    /// Operations of the given kind.
    pub fn operations(&self, kind: OperationKind) -> &[Operation] {
        match kind {
            OperationKind::Subscribe => &self.subscribe,
            OperationKind::Publish => &self.publish,
        }
    }
}

/// An operation descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Operation identifier.
    #[serde(
        rename = "operationId",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    name: Option<String>,
    /// Short summary.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    summary: Option<String>,
    /// Longer description.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    description: Option<String>,
}

impl Operation {
    /// Create an operation with an identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Operation identifier, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Summary, if any.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Deserialize an optional field, treating values of the wrong shape as absent.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Deserialize an operation slot that may hold one object or a list. Entries that are not
/// objects are dropped.
fn one_or_many<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(values) => values
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|value| serde_json::from_value(value).ok())
            .collect(),
        value @ Value::Object(_) => serde_json::from_value(value).into_iter().collect(),
        _ => Vec::new(),
    })
}
