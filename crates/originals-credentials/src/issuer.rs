use originals_core::{CredentialSubject, CredentialSubtype, Did, PreviousCredential, Timestamp, VerifiableCredential};
use serde_json::json;

const BASE_CONTEXT: &str = "https://www.w3.org/ns/credentials/v2";
const ORIGINALS_CONTEXT: &str = "https://originals.dev/contexts/v1";

/// The generic, subtype-parameterized credential builder (§4.4
/// `createResourceCredential`). Every typed issuer below is a thin wrapper
/// around this.
pub fn create_credential(
    subtype: CredentialSubtype,
    subject: CredentialSubject,
    issuer: Did,
    issuance_date: Timestamp,
) -> VerifiableCredential {
    let mut vc = VerifiableCredential {
        context: vec![BASE_CONTEXT.to_string(), ORIGINALS_CONTEXT.to_string()],
        id: None,
        types: vec!["VerifiableCredential".to_string(), subtype.as_str().to_string()],
        issuer,
        issuance_date,
        expiration_date: None,
        credential_subject: subject,
        proof: None,
    };
    // Content-addressed id, so chain links can name a predecessor before it
    // is signed.
    let value = serde_json::to_value(&vc).unwrap_or(serde_json::Value::Null);
    let hash = originals_canon::canonical_hash_hex(&value);
    vc.id = Some(format!("urn:originals:vc:{hash}"));
    vc
}

fn subject(subject_did: Did, fields: serde_json::Value, previous: Option<PreviousCredential>) -> CredentialSubject {
    CredentialSubject { id: subject_did, previous_credential: previous, fields }
}

pub fn issue_resource_credential(
    subject_did: Did,
    issuer: Did,
    resource_id: &str,
    resource_type: &str,
    content_hash: &str,
    issuance_date: Timestamp,
) -> VerifiableCredential {
    let fields = json!({ "resourceId": resource_id, "resourceType": resource_type, "contentHash": content_hash });
    create_credential(CredentialSubtype::ResourceCreated, subject(subject_did, fields, None), issuer, issuance_date)
}

pub fn issue_resource_update_credential(
    subject_did: Did,
    issuer: Did,
    resource_id: &str,
    previous_version_hash: &str,
    new_version_hash: &str,
    previous: Option<PreviousCredential>,
    issuance_date: Timestamp,
) -> VerifiableCredential {
    let fields = json!({
        "resourceId": resource_id,
        "previousVersionHash": previous_version_hash,
        "newVersionHash": new_version_hash,
    });
    create_credential(CredentialSubtype::ResourceUpdated, subject(subject_did, fields, previous), issuer, issuance_date)
}

pub fn issue_migration_credential(
    subject_did: Did,
    issuer: Did,
    from_did: &str,
    to_did: &str,
    previous: Option<PreviousCredential>,
    issuance_date: Timestamp,
) -> VerifiableCredential {
    let fields = json!({ "fromDid": from_did, "toDid": to_did });
    create_credential(CredentialSubtype::MigrationCompleted, subject(subject_did, fields, previous), issuer, issuance_date)
}

pub fn issue_ownership_credential(
    subject_did: Did,
    issuer: Did,
    from_address: &str,
    to_address: &str,
    satoshi: u64,
    previous: Option<PreviousCredential>,
    issuance_date: Timestamp,
) -> VerifiableCredential {
    let fields = json!({ "fromAddress": from_address, "toAddress": to_address, "satoshi": satoshi });
    create_credential(CredentialSubtype::OwnershipTransferred, subject(subject_did, fields, previous), issuer, issuance_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_credential_carries_its_subtype_and_fields() {
        let vc = issue_resource_credential(
            "did:peer:0abc".to_string(),
            "did:peer:0abc".to_string(),
            "res-1",
            "text/plain",
            "deadbeef",
            1_700_000_000,
        );
        assert!(vc.types.contains(&"ResourceCreated".to_string()));
        assert_eq!(vc.credential_subject.fields["resourceId"], "res-1");
        assert!(vc.proof.is_none());
    }

    #[test]
    fn ownership_credential_carries_the_transferred_satoshi() {
        let vc = issue_ownership_credential(
            "did:btco:123".to_string(),
            "did:btco:123".to_string(),
            "addr-from",
            "addr-to",
            123,
            None,
            1_700_000_100,
        );
        assert_eq!(vc.credential_subject.fields["satoshi"], 123);
    }
}
