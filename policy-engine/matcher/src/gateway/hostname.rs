use kuma_policy_core::WILDCARD_HOSTNAME;

/// Returns true if `hostname` names `other`, either exactly or as a wildcard over one of its
/// subdomains. `*.example.com` contains `foo.example.com` and `*.foo.example.com`, but
/// `example.com` contains neither `*.example.com` nor any other host.
pub fn contains(hostname: &str, other: &str) -> bool {
    if hostname == other {
        return true;
    }

    let (first, domain) = split(hostname);
    if first != WILDCARD_HOSTNAME {
        return false;
    }

    let (_, other_domain) = split(other);
    other_domain.ends_with(&domain)
}

/// Returns true if `target` equals any of the `candidates`, or if either contains the other.
pub fn hostnames<I>(target: &str, candidates: I) -> bool
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    candidates.into_iter().any(|candidate| {
        let candidate = candidate.as_ref();
        target == candidate || contains(target, candidate) || contains(candidate, target)
    })
}

/// Splits a hostname into its first label and the labels of its parent domain.
fn split(hostname: &str) -> (&str, Vec<&str>) {
    match hostname.split_once('.') {
        Some((first, domain)) => (first, domain.split('.').collect()),
        None => (hostname, Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_directional() {
        for (hostname, other, expected) in [
            ("example.com", "example.com", true),
            ("*.example.com", "foo.example.com", true),
            ("*.example.com", "bar.foo.example.com", true),
            ("*.example.com", "*.foo.example.com", true),
            ("*.com", "*.examples.com", true),
            ("*", "foo.example.com", true),
            ("example.com", "*.example.com", false),
            ("foo.example.com", "*.example.com", false),
            ("foo.example.com", "bar.example.com", false),
            ("*.example.com", "example.com", false),
            ("*.example.com", "foo.example.org", false),
        ] {
            assert_eq!(
                contains(hostname, other),
                expected,
                "contains({}, {})",
                hostname,
                other
            );
        }
    }

    #[test]
    fn hostnames_match_in_either_direction() {
        assert!(hostnames("foo.example.com", ["foo.example.com"]));
        assert!(hostnames("*.example.com", ["foo.example.com"]));
        assert!(hostnames("foo.example.com", ["*.example.com"]));
        assert!(hostnames("*.com", ["*.examples.com"]));
        assert!(hostnames("*.examples.com", ["*.com"]));
        assert!(hostnames("foo.example.com", ["bar.example.com", "*"]));
        assert!(!hostnames("foo.example.com", ["bar.example.com"]));
        assert!(!hostnames("foo.example.com", Vec::<String>::new()));
    }

    #[test]
    fn every_hostname_matches_itself() {
        for hostname in ["*", "localhost", "example.com", "*.example.com", "a.b.c.d"] {
            assert!(hostnames(hostname, [hostname]), "{}", hostname);
            assert!(contains(hostname, hostname), "{}", hostname);
        }
    }
}
