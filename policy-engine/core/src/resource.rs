use crate::tags::Selector;
use anyhow::Result;
use chrono::{offset::Utc, DateTime};
use std::{fmt, sync::Arc};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceType {
    Mesh,
    Dataplane,
    RateLimit,
    Retry,
    Timeout,
    TrafficPermission,
    ProxyTemplate,
    MeshGateway,
}

/// Identifies a resource within the store.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceMeta {
    pub name: String,
    pub mesh: String,

    /// Only used to break ties between equally specific policies.
    pub creation_time: DateTime<Utc>,
}

pub trait Resource {
    fn meta(&self) -> &ResourceMeta;

    fn resource_type(&self) -> ResourceType;
}

/// A policy that governs connections from `sources` to `destinations`.
pub trait ConnectionPolicy: Resource {
    fn sources(&self) -> &[Selector];

    fn destinations(&self) -> &[Selector];
}

/// A policy that applies directly to a dataplane, or to one of its inbounds.
pub trait DataplanePolicy: Resource {
    fn selectors(&self) -> &[Selector];
}

/// Models read access to the resources of a mesh.
#[async_trait::async_trait]
pub trait ReadOnlyResourceManager {
    /// Lists all resources of type `R` in the given mesh.
    async fn list<R>(&self, mesh: &str) -> Result<Vec<Arc<R>>>
    where
        R: Resource + Send + Sync + 'static;
}

// === impl ResourceMeta ===

impl ResourceMeta {
    pub fn new(mesh: impl ToString, name: impl ToString, creation_time: DateTime<Utc>) -> Self {
        Self {
            name: name.to_string(),
            mesh: mesh.to_string(),
            creation_time,
        }
    }
}

impl fmt::Display for ResourceMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.mesh, self.name)
    }
}

// === impl ResourceType ===

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mesh => "Mesh",
            Self::Dataplane => "Dataplane",
            Self::RateLimit => "RateLimit",
            Self::Retry => "Retry",
            Self::Timeout => "Timeout",
            Self::TrafficPermission => "TrafficPermission",
            Self::ProxyTemplate => "ProxyTemplate",
            Self::MeshGateway => "MeshGateway",
        };
        f.write_str(name)
    }
}

// === Shared references ===

impl<T: Resource + ?Sized> Resource for Arc<T> {
    #[inline]
    fn meta(&self) -> &ResourceMeta {
        (**self).meta()
    }

    #[inline]
    fn resource_type(&self) -> ResourceType {
        (**self).resource_type()
    }
}

impl<T: ConnectionPolicy + ?Sized> ConnectionPolicy for Arc<T> {
    #[inline]
    fn sources(&self) -> &[Selector] {
        (**self).sources()
    }

    #[inline]
    fn destinations(&self) -> &[Selector] {
        (**self).destinations()
    }
}

impl<T: DataplanePolicy + ?Sized> DataplanePolicy for Arc<T> {
    #[inline]
    fn selectors(&self) -> &[Selector] {
        (**self).selectors()
    }
}

#[async_trait::async_trait]
impl<T: ReadOnlyResourceManager + Send + Sync> ReadOnlyResourceManager for Arc<T> {
    async fn list<R>(&self, mesh: &str) -> Result<Vec<Arc<R>>>
    where
        R: Resource + Send + Sync + 'static,
    {
        (**self).list::<R>(mesh).await
    }
}

impl<T: Resource + ?Sized> Resource for &T {
    #[inline]
    fn meta(&self) -> &ResourceMeta {
        (**self).meta()
    }

    #[inline]
    fn resource_type(&self) -> ResourceType {
        (**self).resource_type()
    }
}

impl<T: ConnectionPolicy + ?Sized> ConnectionPolicy for &T {
    #[inline]
    fn sources(&self) -> &[Selector] {
        (**self).sources()
    }

    #[inline]
    fn destinations(&self) -> &[Selector] {
        (**self).destinations()
    }
}

impl<T: DataplanePolicy + ?Sized> DataplanePolicy for &T {
    #[inline]
    fn selectors(&self) -> &[Selector] {
        (**self).selectors()
    }
}
