use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use reqwest::dns::{Addrs, Name, Resolve, Resolving};
use trust_dns_resolver::{
    TokioAsyncResolver,
    config::{NameServerConfig, NameServerConfigGroup, Protocol, ResolverConfig, ResolverOpts},
};

use crate::error::{HttpidError, Result};

/// Setup a DNS resolver using the provided DNS hosts.
///
/// Queries go over TCP to port 53 of every host, with 2 attempts per query
/// and a response cache shared by all probes of the batch.
pub fn setup_resolver(dns_hosts: &[String]) -> Result<TokioAsyncResolver> {
    let mut opts = ResolverOpts::default();
    opts.attempts = 2;
    opts.timeout = Duration::from_secs(2);
    opts.cache_size = 1024;

    let mut name_servers = NameServerConfigGroup::new();

    for host in dns_hosts {
        let ip: IpAddr = host.parse().map_err(|source| HttpidError::DnsHost {
            host: host.clone(),
            source,
        })?;
        name_servers.push(NameServerConfig {
            socket_addr: (ip, 53).into(),
            protocol: Protocol::Tcp,
            tls_dns_name: None,
            trust_negative_responses: false,
            bind_addr: None,
        });
    }

    let resolver_config = ResolverConfig::from_parts(None, vec![], name_servers);
    Ok(TokioAsyncResolver::tokio(resolver_config, opts))
}

/// Plugs a [`TokioAsyncResolver`] into reqwest's name resolution.
#[derive(Clone)]
pub struct CustomResolver {
    resolver: TokioAsyncResolver,
}

impl CustomResolver {
    pub fn new(dns_hosts: &[String]) -> Result<Self> {
        Ok(Self {
            resolver: setup_resolver(dns_hosts)?,
        })
    }
}

impl Resolve for CustomResolver {
    fn resolve(&self, name: Name) -> Resolving {
        let resolver = self.resolver.clone();
        Box::pin(async move {
            let lookup = match resolver.lookup_ip(name.as_str()).await {
                Ok(lookup) => lookup,
                Err(e) => return Err(Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
            };
            // reqwest replaces the port with the one from the URL
            let addrs: Vec<SocketAddr> = lookup.iter().map(|ip| SocketAddr::new(ip, 0)).collect();
            Ok(Box::new(addrs.into_iter()) as Addrs)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_probe::prelude::*;
    use std::sync::Arc;

    fn resolving_client(dns_hosts: &[&str]) -> reqwest::Client {
        let hosts: Vec<String> = dns_hosts.iter().map(|h| h.to_string()).collect();
        reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .dns_resolver(Arc::new(CustomResolver::new(&hosts).unwrap()))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_setup_resolver_accepts_ip_hosts() {
        let hosts = vec!["1.1.1.1".to_string(), "2606:4700:4700::1111".to_string()];
        assert!(setup_resolver(&hosts).is_ok());
        assert!(CustomResolver::new(&hosts).is_ok());
    }

    #[tokio::test]
    async fn test_setup_resolver_rejects_hostnames() {
        let hosts = vec!["1.1.1.1".to_string(), "dns.example".to_string()];
        match setup_resolver(&hosts) {
            Err(HttpidError::DnsHost { host, .. }) => assert_eq!(host, "dns.example"),
            other => panic!("expected DnsHost error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_resolution_failure_is_a_probe_failure() {
        let client = resolving_client(&["127.0.0.1"]);
        let endpoint = Endpoint {
            id: 0,
            url: "http://nothing.invalid/".to_string(),
        };
        let mut settings = ProbeSettings {
            method: HttpMethod::Head,
            header_names: Arc::from(vec!["Server".to_string()]),
            verbose: false,
            timeout: Duration::from_secs(5),
        };

        let result = probe_endpoint(&client, &endpoint, &settings).await;
        assert_eq!(result.status_summary, ERROR_SENTINEL);
        assert_eq!(result.status_code, None);
        assert!(result.header_values.is_empty());

        settings.verbose = true;
        let result = probe_endpoint(&client, &endpoint, &settings).await;
        assert_ne!(result.status_summary, ERROR_SENTINEL);
        assert!(result.status_summary.contains("nothing.invalid"));
        assert_eq!(result.status_code, None);
    }
}
