use crate::signer::{Signature, VerifyingKey};

/// Checks that a signature over a payload was produced by the holder of a
/// credential.
///
/// Implementations must be deterministic and total: malformed credentials
/// or signatures yield `false`, never a panic.
pub trait SignatureVerifier: Send + Sync {
    fn verify(&self, credential: &[u8], payload: &[u8], signature: &[u8]) -> bool;
}

impl<V: SignatureVerifier + ?Sized> SignatureVerifier for &V {
    fn verify(&self, credential: &[u8], payload: &[u8], signature: &[u8]) -> bool {
        (**self).verify(credential, payload, signature)
    }
}

impl<V: SignatureVerifier + ?Sized> SignatureVerifier for Box<V> {
    fn verify(&self, credential: &[u8], payload: &[u8], signature: &[u8]) -> bool {
        (**self).verify(credential, payload, signature)
    }
}

/// Verifier for 32-byte Ed25519 credentials and 64-byte signatures.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(&self, credential: &[u8], payload: &[u8], signature: &[u8]) -> bool {
        let Ok(key) = VerifyingKey::from_credential(credential) else {
            return false;
        };
        let Ok(signature) = Signature::from_slice(signature) else {
            return false;
        };
        key.verify(payload, &signature).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::SigningKey;

    #[test]
    fn accepts_genuine_signature() {
        let sk = SigningKey::from_bytes([1; 32]);
        let sig = sk.sign(b"payload").to_bytes();
        assert!(Ed25519Verifier.verify(&sk.verifying_key().as_bytes(), b"payload", &sig));
    }

    #[test]
    fn rejects_other_payload() {
        let sk = SigningKey::from_bytes([1; 32]);
        let sig = sk.sign(b"payload").to_bytes();
        assert!(!Ed25519Verifier.verify(&sk.verifying_key().as_bytes(), b"other", &sig));
    }

    #[test]
    fn rejects_other_credential() {
        let signer = SigningKey::from_bytes([1; 32]);
        let owner = SigningKey::from_bytes([2; 32]);
        let sig = signer.sign(b"payload").to_bytes();
        assert!(!Ed25519Verifier.verify(&owner.verifying_key().as_bytes(), b"payload", &sig));
    }

    #[test]
    fn malformed_inputs_are_false() {
        let sk = SigningKey::from_bytes([1; 32]);
        let cred = sk.verifying_key().as_bytes();
        let sig = sk.sign(b"payload").to_bytes();

        assert!(!Ed25519Verifier.verify(&[], b"payload", &sig));
        assert!(!Ed25519Verifier.verify(&cred[..31], b"payload", &sig));
        assert!(!Ed25519Verifier.verify(&cred, b"payload", &[]));
        assert!(!Ed25519Verifier.verify(&cred, b"payload", &sig[..63]));
        assert!(!Ed25519Verifier.verify(&cred, b"payload", &[0xff; 64]));
        assert!(!Ed25519Verifier.verify(&[0xff; 32], b"payload", &sig));
    }

    #[test]
    fn works_through_references_and_boxes() {
        let sk = SigningKey::from_bytes([3; 32]);
        let sig = sk.sign(b"m").to_bytes();
        let cred = sk.verifying_key().as_bytes();
        let boxed: Box<dyn SignatureVerifier> = Box::new(Ed25519Verifier);
        assert!(boxed.verify(&cred, b"m", &sig));
        assert!((&Ed25519Verifier).verify(&cred, b"m", &sig));
    }
}
