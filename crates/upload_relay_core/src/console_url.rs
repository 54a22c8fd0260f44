pub const DEFAULT_CONSOLE_REGION: &str = "ap-south-1";

const CONSOLE_OBJECT_BASE: &str = "https://s3.console.aws.amazon.com/s3/object";

/// Console link for a single object. The key is embedded as received from
/// the notification, which already carries it URL-encoded.
pub fn object_console_url(bucket_name: &str, object_key: &str, region: &str) -> String {
    format!("{CONSOLE_OBJECT_BASE}/{bucket_name}/{object_key}?region={region}")
}
