use originals_core::{Did, VerifiableCredential, VerifiablePresentation};

const PRESENTATION_CONTEXT: &str = "https://www.w3.org/ns/credentials/v2";

/// Wrap one or more credentials in a presentation held by `holder_did`.
pub fn create_presentation(credentials: Vec<VerifiableCredential>, holder_did: Did) -> VerifiablePresentation {
    VerifiablePresentation {
        context: vec![PRESENTATION_CONTEXT.to_string()],
        types: vec!["VerifiablePresentation".to_string()],
        holder: holder_did,
        verifiable_credential: credentials,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use originals_core::{CredentialSubject, CredentialSubtype};

    #[test]
    fn presentation_wraps_its_credentials_under_the_holder() {
        let vc = crate::issuer::create_credential(
            CredentialSubtype::ResourceCreated,
            CredentialSubject { id: "did:peer:0abc".to_string(), previous_credential: None, fields: serde_json::json!({}) },
            "did:peer:0abc".to_string(),
            1,
        );
        let vp = create_presentation(vec![vc], "did:peer:0abc".to_string());
        assert_eq!(vp.holder, "did:peer:0abc");
        assert_eq!(vp.verifiable_credential.len(), 1);
    }
}
