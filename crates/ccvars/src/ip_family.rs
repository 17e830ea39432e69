//! IP family classification of cluster network CIDRs
//!
//! Pods and services CIDRs are each given as up to two comma separated CIDRs. Both lists have to resolve
//! to the same family. With `isIPV6Primary` set the first CIDR of a list must be IPv6, and a dual stack
//! family is reported as `ipv6,ipv4`; otherwise dual stack is always `ipv4,ipv6`, whatever the input order.
use std::net::IpAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IpFamily {
    #[default]
    Ipv4,
    Ipv6,
    DualStackPrimaryIpv4,
    DualStackPrimaryIpv6,
}

impl IpFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            IpFamily::Ipv4 => "ipv4",
            IpFamily::Ipv6 => "ipv6",
            IpFamily::DualStackPrimaryIpv4 => "ipv4,ipv6",
            IpFamily::DualStackPrimaryIpv6 => "ipv6,ipv4",
        }
    }
}

impl std::fmt::Display for IpFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum IpFamilyError {
    #[error("too many CIDRs specified: [{}]", .0.join(" "))]
    TooManyCidrs(Vec<String>),
    #[error("could not parse CIDR {cidr}, error: {reason}")]
    UnparsableCidr { cidr: String, reason: String },
    #[error("the isIPV6Primary: true, but the first value in CIDRs:\"[{}]\" is not ipv6", .0.join(" "))]
    PrimaryFamilyMismatch(Vec<String>),
    #[error("the IP Families of input CIDRs: \"{pods}\":\"{pods_family}\" , \"{services}\":\"{services_family}\", both are not same IP Families")]
    FamiliesDiffer {
        pods: String,
        pods_family: IpFamily,
        services: String,
        services_family: IpFamily,
    },
}

/// Classify pods and services CIDRs (comma separated, may be empty) and require them to agree
pub fn classify_pair(
    pods_cidrs: &str,
    service_cidrs: &str,
    is_ipv6_primary: bool,
) -> Result<IpFamily, IpFamilyError> {
    let pods_family = classify_joined(pods_cidrs, is_ipv6_primary)?;
    let services_family = classify_joined(service_cidrs, is_ipv6_primary)?;

    if pods_family != services_family {
        return Err(IpFamilyError::FamiliesDiffer {
            pods: pods_cidrs.to_string(),
            pods_family,
            services: service_cidrs.to_string(),
            services_family,
        });
    }

    tracing::debug!(pods_cidrs, service_cidrs, family = %pods_family, "ip family resolved");
    Ok(pods_family)
}

fn classify_joined(cidrs: &str, is_ipv6_primary: bool) -> Result<IpFamily, IpFamilyError> {
    if cidrs.is_empty() {
        return Ok(IpFamily::default());
    }

    let cidrs: Vec<&str> = cidrs.split(',').map(str::trim).collect();
    classify_list(&cidrs, is_ipv6_primary)
}

/// Classify at most two CIDRs
pub fn classify_list<S: AsRef<str>>(
    cidrs: &[S],
    is_ipv6_primary: bool,
) -> Result<IpFamily, IpFamilyError> {
    let owned = || cidrs.iter().map(|c| c.as_ref().to_string()).collect();

    if cidrs.len() > 2 {
        return Err(IpFamilyError::TooManyCidrs(owned()));
    }

    let mut found_ipv4 = false;
    let mut found_ipv6 = false;
    for (index, cidr) in cidrs.iter().enumerate() {
        if is_ipv4(cidr.as_ref())? {
            if is_ipv6_primary && index == 0 {
                return Err(IpFamilyError::PrimaryFamilyMismatch(owned()));
            }
            found_ipv4 = true;
        } else {
            found_ipv6 = true;
        }
    }

    Ok(match (found_ipv4, found_ipv6) {
        (true, true) if is_ipv6_primary => IpFamily::DualStackPrimaryIpv6,
        (true, true) => IpFamily::DualStackPrimaryIpv4,
        (false, true) => IpFamily::Ipv6,
        _ => IpFamily::Ipv4,
    })
}

/// Parse `address/prefix`. IPv4-mapped IPv6 addresses count as IPv4.
fn is_ipv4(cidr: &str) -> Result<bool, IpFamilyError> {
    let unparsable = |reason: String| IpFamilyError::UnparsableCidr {
        cidr: cidr.to_string(),
        reason,
    };

    let (address, prefix) = cidr
        .split_once('/')
        .ok_or_else(|| unparsable("missing prefix length".into()))?;
    let address: IpAddr = address
        .parse()
        .map_err(|e: std::net::AddrParseError| unparsable(e.to_string()))?;

    // a leading sign or zero padding is not a valid prefix length
    if prefix.is_empty()
        || !prefix.bytes().all(|b| b.is_ascii_digit())
        || (prefix.len() > 1 && prefix.starts_with('0'))
    {
        return Err(unparsable(format!("invalid prefix length {prefix:?}")));
    }
    let prefix: u8 = prefix
        .parse()
        .map_err(|_| unparsable(format!("invalid prefix length {prefix:?}")))?;

    let (is_ipv4, max_prefix) = match address {
        IpAddr::V4(_) => (true, 32),
        IpAddr::V6(v6) if v6.to_ipv4_mapped().is_some() => (true, 128),
        IpAddr::V6(_) => (false, 128),
    };
    if prefix > max_prefix {
        return Err(unparsable(format!("prefix length {prefix} out of range")));
    }

    Ok(is_ipv4)
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    const IPV6_IPV4: &str = "2002::1234:abcd:ffff:c0a8:101/64,100.64.0.0/18";
    const IPV4_IPV6: &str = "100.64.0.0/18,2002::1234:abcd:ffff:c0a8:101/64";
    const IPV4_ONLY: &str = "100.96.0.0/12,100.64.0.0/16";

    fn list(cidrs: &str) -> Vec<&str> {
        cidrs.split(',').collect()
    }

    #[test]
    fn ipv6_primary_rejects_leading_ipv4() {
        for cidrs in [IPV4_ONLY, IPV4_IPV6] {
            let err = classify_list(&list(cidrs), true).expect_err("must fail");
            assert!(matches!(err, IpFamilyError::PrimaryFamilyMismatch(_)));
            assert!(err
                .to_string()
                .contains("the isIPV6Primary: true, but the first value in CIDRs"));
        }
    }

    #[test]
    fn ipv6_primary_dual_stack() {
        assert_eq!(
            classify_list(&list(IPV6_IPV4), true),
            Ok(IpFamily::DualStackPrimaryIpv6)
        );
    }

    #[test]
    fn ipv6_only() {
        assert_eq!(
            classify_list(&["2002::1234:abcd:ffff:c0a8:101/64", "fd00::/48"], true),
            Ok(IpFamily::Ipv6)
        );
        assert_eq!(classify_list(&["fd00::/48"], false), Ok(IpFamily::Ipv6));
    }

    #[test]
    fn dual_stack_order_follows_flag_only() {
        assert_eq!(
            classify_list(&list(IPV6_IPV4), false),
            Ok(IpFamily::DualStackPrimaryIpv4)
        );
        assert_eq!(
            classify_list(&list(IPV4_IPV6), false),
            Ok(IpFamily::DualStackPrimaryIpv4)
        );
    }

    #[test]
    fn ipv4_only() {
        assert_eq!(classify_list(&list(IPV4_ONLY), false), Ok(IpFamily::Ipv4));
        assert_eq!(classify_list(&["100.96.0.0/11"], false), Ok(IpFamily::Ipv4));
        assert_eq!(classify_list::<&str>(&[], false), Ok(IpFamily::Ipv4));
    }

    #[test]
    fn ipv4_mapped_counts_as_ipv4() {
        assert_eq!(classify_list(&["::ffff:10.0.0.0/104"], false), Ok(IpFamily::Ipv4));
    }

    #[test]
    fn unparsable() {
        for cidrs in [
            "2002::1234:abcd:ffff:c0a8:101/164,100.64.0.0/18",
            "100.64.0.0/18,2002::1234:abcd:ffff:c0a8:101/164",
            "100.64.0.0/38,2002::1234:abcd:ffff:c0a8:101/64",
            "100.64.0.0,2002::1234:abcd:ffff:c0a8:101/64",
            "100.64.0.0/+1",
            "not-an-ip/8",
        ] {
            let err = classify_list(&list(cidrs), false).expect_err(cidrs);
            assert!(err.to_string().contains("could not parse CIDR"), "{err}");
        }
    }

    #[test]
    fn too_many() {
        let err = classify_list(&["100.64.0.0/18", "100.64.0.0/18", "100.64.0.0/18"], false)
            .expect_err("must fail");
        assert_eq!(
            err.to_string(),
            "too many CIDRs specified: [100.64.0.0/18 100.64.0.0/18 100.64.0.0/18]"
        );
    }

    #[test]
    fn pair_dual_stack_ipv6_primary() {
        assert_eq!(
            classify_pair(IPV6_IPV4, IPV6_IPV4, true).map(|f| f.as_str()),
            Ok("ipv6,ipv4")
        );
    }

    #[test]
    fn pair_dual_stack_ipv4_primary() {
        assert_eq!(
            classify_pair(IPV4_IPV6, IPV4_IPV6, false).map(|f| f.as_str()),
            Ok("ipv4,ipv6")
        );
        assert_eq!(
            classify_pair(IPV6_IPV4, IPV4_IPV6, false),
            Ok(IpFamily::DualStackPrimaryIpv4)
        );
    }

    #[test]
    fn pair_ipv4() {
        assert_eq!(classify_pair(IPV4_ONLY, IPV4_ONLY, false), Ok(IpFamily::Ipv4));
    }

    #[test]
    fn pair_primary_violation() {
        let err = classify_pair(IPV4_ONLY, IPV4_ONLY, true).expect_err("must fail");
        assert!(err
            .to_string()
            .contains("the isIPV6Primary: true, but the first value in CIDRs"));
    }

    #[test]
    fn pair_families_differ() {
        let err = classify_pair(IPV4_IPV6, IPV4_ONLY, false).expect_err("must fail");
        let message = err.to_string();
        assert!(message.contains("not same IP Families"), "{message}");
        assert!(message.contains(IPV4_IPV6), "{message}");
        assert!(message.contains(IPV4_ONLY), "{message}");
    }

    #[test]
    fn whitespace_around_cidrs_is_ignored() {
        assert_eq!(
            classify_pair(
                " 100.64.0.0/18, 2002::1234:abcd:ffff:c0a8:101/64 ",
                IPV4_IPV6,
                false
            ),
            classify_pair(IPV4_IPV6, IPV4_IPV6, false)
        );
        assert!(classify_pair("100.64.0.0/ 18", IPV4_ONLY, false).is_err());
    }

    #[test]
    fn empty_inputs_default_to_ipv4() {
        assert_eq!(classify_pair("", "", false), Ok(IpFamily::Ipv4));
        assert_eq!(classify_pair("", IPV4_ONLY, false), Ok(IpFamily::Ipv4));

        let err = classify_pair("", "fd00::/108", false).expect_err("must fail");
        assert!(matches!(
            err,
            IpFamilyError::FamiliesDiffer {
                pods_family: IpFamily::Ipv4,
                services_family: IpFamily::Ipv6,
                ..
            }
        ));
    }
}
