//! Helpers used when merging the routes of a builtin gateway.

mod hostname;
mod policy;

pub use self::{
    hostname::{contains, hostnames},
    policy::{
        best_connection_policy_for_destination, connection_policies_by_source, RankedPolicy,
        RouteDestination,
    },
};
