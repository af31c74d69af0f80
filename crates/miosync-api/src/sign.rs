// AWS Signature Version 4 request signing.
//
// Both the MinIO admin API and the S3 object-lock endpoint authenticate
// requests with SigV4. The signed header set is fixed to
// host;x-amz-content-sha256;x-amz-date, which is all MinIO requires.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use url::Url;

type HmacSha256 = Hmac<Sha256>;

/// MinIO accepts the default region for both admin and S3 calls.
const REGION: &str = "us-east-1";
const SERVICE: &str = "s3";
const SIGNED_HEADERS: &str = "host;x-amz-content-sha256;x-amz-date";

/// Headers to attach to the outgoing request.
#[derive(Debug)]
pub struct Signature {
    pub amz_date: String,
    pub content_sha256: String,
    pub authorization: String,
}

/// Sign one request, producing the `x-amz-date`, `x-amz-content-sha256`
/// and `Authorization` header values.
pub fn sign_request(
    method: &str,
    url: &Url,
    payload: &[u8],
    access_key: &str,
    secret_key: &str,
    now: DateTime<Utc>,
) -> Signature {
    let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
    let date = now.format("%Y%m%d").to_string();
    let content_sha256 = hex::encode(Sha256::digest(payload));

    let canonical_uri = if url.path().is_empty() { "/" } else { url.path() };
    let canonical_headers = format!(
        "host:{}\nx-amz-content-sha256:{content_sha256}\nx-amz-date:{amz_date}\n",
        canonical_host(url)
    );
    let canonical_request = format!(
        "{method}\n{canonical_uri}\n{}\n{canonical_headers}\n{SIGNED_HEADERS}\n{content_sha256}",
        canonical_query_string(url)
    );

    let scope = format!("{date}/{REGION}/{SERVICE}/aws4_request");
    let string_to_sign = format!(
        "AWS4-HMAC-SHA256\n{amz_date}\n{scope}\n{}",
        hex::encode(Sha256::digest(canonical_request.as_bytes()))
    );

    let signing_key = derive_signing_key(secret_key, &date);
    let signature = hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes()));

    let authorization = format!(
        "AWS4-HMAC-SHA256 Credential={access_key}/{scope}, \
         SignedHeaders={SIGNED_HEADERS}, Signature={signature}"
    );

    Signature {
        amz_date,
        content_sha256,
        authorization,
    }
}

/// Host header value: host plus port when the port is non-default.
fn canonical_host(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_owned(),
        (None, _) => String::new(),
    }
}

/// Query parameters sorted by key, strictly percent-encoded.
fn canonical_query_string(url: &Url) -> String {
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (uri_encode(&k), uri_encode(&v)))
        .collect();
    pairs.sort();
    pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Percent-encode everything outside the SigV4 unreserved set.
fn uri_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(char::from(byte));
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

/// Date -> region -> service -> aws4_request HMAC chain.
fn derive_signing_key(secret_key: &str, date: &str) -> Vec<u8> {
    let k_date = hmac_sha256(format!("AWS4{secret_key}").as_bytes(), date.as_bytes());
    let k_region = hmac_sha256(&k_date, REGION.as_bytes());
    let k_service = hmac_sha256(&k_region, SERVICE.as_bytes());
    hmac_sha256(&k_service, b"aws4_request")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use chrono::TimeZone;

    use super::*;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn signature_is_deterministic() {
        let url: Url = "http://minio.example.com:9000/minio/admin/v3/group?group=ops"
            .parse()
            .unwrap();
        let a = sign_request("GET", &url, b"", "minio", "minio123", fixed_now());
        let b = sign_request("GET", &url, b"", "minio", "minio123", fixed_now());
        assert_eq!(a.authorization, b.authorization);
        assert_eq!(a.amz_date, "20240501T120000Z");
    }

    #[test]
    fn authorization_carries_scope_and_signed_headers() {
        let url: Url = "https://minio.example.com/bucket?object-lock".parse().unwrap();
        let sig = sign_request("PUT", &url, b"<xml/>", "AKIA", "secret", fixed_now());
        assert!(sig.authorization.starts_with("AWS4-HMAC-SHA256 Credential=AKIA/20240501/"));
        assert!(sig.authorization.contains("SignedHeaders=host;x-amz-content-sha256;x-amz-date"));
        // 32-byte HMAC rendered as hex
        let hex_sig = sig.authorization.rsplit("Signature=").next().unwrap();
        assert_eq!(hex_sig.len(), 64);
        assert!(hex_sig.bytes().all(|b| b.is_ascii_hexdigit()));
    }

    #[test]
    fn payload_hash_matches_sha256_of_body() {
        let url: Url = "http://localhost:9000/".parse().unwrap();
        let sig = sign_request("PUT", &url, b"body", "k", "s", fixed_now());
        assert_eq!(
            sig.content_sha256,
            hex::encode(Sha256::digest(b"body"))
        );
    }

    #[test]
    fn query_string_is_sorted_and_encoded() {
        let url: Url = "http://h/p?b=2&a=1%2F3".parse().unwrap();
        assert_eq!(canonical_query_string(&url), "a=1%2F3&b=2");
    }

    #[test]
    fn different_payloads_produce_different_signatures() {
        let url: Url = "http://localhost:9000/x".parse().unwrap();
        let a = sign_request("PUT", &url, b"one", "k", "s", fixed_now());
        let b = sign_request("PUT", &url, b"two", "k", "s", fixed_now());
        assert_ne!(a.authorization, b.authorization);
    }
}
