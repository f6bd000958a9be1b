//! Identifier Anonymization
//!
//! One-way SHA-256 digests for buyer and tenant identifiers. The network
//! never stores plaintext identifiers; every cross-tenant row carries only
//! these digests. Uses domain separation tags so a buyer digest can never
//! collide with a tenant digest for the same plaintext.

use sha2::{Digest, Sha256};

use crate::types::{AnonymousTenantId, GlobalBuyerId, TenantId};

/// Domain separation tags for anonymization contexts
pub mod domain {
    /// Domain tag for buyer identifiers (tax IDs, PANs)
    pub const BUYER_ID: &[u8] = b"NCI:BuyerId:v1\0";
    /// Domain tag for tenant identifiers
    pub const TENANT_ID: &[u8] = b"NCI:TenantId:v1\0";
}

/// Hash an identifier with a domain tag
///
/// The digested message is: domain_tag || identifier
fn hash_identifier(domain_tag: &[u8], identifier: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(domain_tag);
    hasher.update(identifier.as_bytes());
    hex::encode(hasher.finalize())
}

/// Anonymize a plaintext buyer identifier
pub fn anonymize_buyer(identifier: &str) -> GlobalBuyerId {
    GlobalBuyerId(hash_identifier(domain::BUYER_ID, identifier))
}

/// Anonymize a tenant identifier for cross-tenant rows
pub fn anonymize_tenant(tenant_id: &TenantId) -> AnonymousTenantId {
    AnonymousTenantId(hash_identifier(domain::TENANT_ID, &tenant_id.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashing_is_deterministic() {
        let a = anonymize_buyer("ABCDE1234F");
        let b = anonymize_buyer("ABCDE1234F");
        assert_eq!(a, b);
    }

    #[test]
    fn test_digest_never_contains_plaintext() {
        let plaintext = "ABCDE1234F";
        let digest = anonymize_buyer(plaintext);
        assert!(!digest.0.contains(plaintext));
        assert!(!digest.0.to_uppercase().contains(plaintext));
    }

    #[test]
    fn test_digest_is_hex_sha256() {
        let digest = anonymize_buyer("buyer-1");
        assert_eq!(digest.0.len(), 64);
        assert!(digest.0.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_buyer_and_tenant_domains_differ() {
        let as_buyer = anonymize_buyer("shared-id");
        let as_tenant = anonymize_tenant(&TenantId("shared-id".to_string()));
        assert_ne!(as_buyer.0, as_tenant.0);
    }
}
