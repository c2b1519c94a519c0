//! CloudFormation-backed stack lookups.

use async_trait::async_trait;
use aws_sdk_cloudformation::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_cloudformation::Client;

use crate::resolver::{ResolveError, ResolveResult, StackDescriber};

/// CloudFormation reports an unknown logical id as a generic validation
/// error rather than a modeled not-found error.
pub(crate) fn is_missing_resource(code: Option<&str>, message: Option<&str>) -> bool {
    code == Some("ValidationError")
        && message.is_some_and(|m| m.contains("does not exist") && m.contains("Resource"))
}

#[async_trait]
impl StackDescriber for Client {
    async fn physical_id(&self, stack: &str, logical_id: &str) -> ResolveResult<Option<String>> {
        let output = match self
            .describe_stack_resource()
            .stack_name(stack)
            .logical_resource_id(logical_id)
            .send()
            .await
        {
            Ok(output) => output,
            Err(err) => {
                if let Some(service_err) = err.as_service_error() {
                    if is_missing_resource(service_err.code(), service_err.message()) {
                        return Ok(None);
                    }
                }
                return Err(ResolveError::Api {
                    logical_id: logical_id.to_string(),
                    message: DisplayErrorContext(&err).to_string(),
                });
            }
        };

        let physical_id = output
            .stack_resource_detail()
            .and_then(|detail| detail.physical_resource_id())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ResolveError::MissingPhysicalId(logical_id.to_string()))?;

        Ok(Some(physical_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_resource_classification() {
        assert!(is_missing_resource(
            Some("ValidationError"),
            Some("Resource GoFunction does not exist for stack bench"),
        ));
        assert!(!is_missing_resource(
            Some("ValidationError"),
            Some("Stack with id bench does not exist"),
        ));
        assert!(!is_missing_resource(Some("AccessDenied"), Some("Resource does not exist")));
        assert!(!is_missing_resource(None, None));
    }
}
