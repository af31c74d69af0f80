// S3 object-lock configuration endpoint.
//
// Write-only surface: MinIO exposes no admin read for the lock
// configuration this client sets, so there is no `get` counterpart.
// The configuration document is a fixed five-element XML body.

use tracing::debug;
use url::Url;

use crate::admin::AdminClient;
use crate::error::Error;

/// Default retention mode for an object-lock rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    Governance,
    Compliance,
}

impl LockMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Governance => "GOVERNANCE",
            Self::Compliance => "COMPLIANCE",
        }
    }
}

impl AdminClient {
    /// Set the bucket's default object-lock retention rule.
    pub async fn set_object_lock_config(
        &self,
        bucket: &str,
        mode: LockMode,
        days: u32,
    ) -> Result<(), Error> {
        let body = format!(
            "<ObjectLockConfiguration>\
             <ObjectLockEnabled>Enabled</ObjectLockEnabled>\
             <Rule><DefaultRetention>\
             <Mode>{}</Mode><Days>{days}</Days>\
             </DefaultRetention></Rule>\
             </ObjectLockConfiguration>",
            mode.as_str()
        );
        self.put_object_lock(bucket, body).await
    }

    /// Remove the bucket's default retention rule by writing an empty
    /// lock configuration.
    pub async fn clear_object_lock_config(&self, bucket: &str) -> Result<(), Error> {
        let body = "<ObjectLockConfiguration>\
                    <ObjectLockEnabled>Enabled</ObjectLockEnabled>\
                    </ObjectLockConfiguration>"
            .to_owned();
        self.put_object_lock(bucket, body).await
    }

    async fn put_object_lock(&self, bucket: &str, body: String) -> Result<(), Error> {
        let url = self.lock_url(bucket)?;
        debug!("PUT {}", url);
        match self.send(reqwest::Method::PUT, url, body.into_bytes()).await {
            Ok(_) => Ok(()),
            // The S3 surface reports errors as XML, not the admin JSON shape.
            Err(Error::Admin {
                message, status, ..
            }) => Err(Error::S3 { message, status }),
            Err(other) => Err(other),
        }
    }

    fn lock_url(&self, bucket: &str) -> Result<Url, Error> {
        let mut url = Url::parse(&format!("{}{bucket}", self.base_url()))?;
        url.set_query(Some("object-lock"));
        Ok(url)
    }
}
