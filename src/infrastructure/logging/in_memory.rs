use crate::core::errors::ServiceError;
use crate::core::models::audit::AppLog;
use crate::infrastructure::logging::LoggingService;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct InMemoryLogging {
    logs: Arc<RwLock<Vec<AppLog>>>,
}

impl InMemoryLogging {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LoggingService for InMemoryLogging {
    async fn log_action(
        &self,
        action: &str,
        group_id: Option<&str>,
        details: serde_json::Value,
        member_id: Option<&str>,
    ) -> Result<(), ServiceError> {
        let details = serde_json::from_value(details)
            .map_err(|e| ServiceError::LoggingError(format!("Log details must be an object: {}", e)))?;
        let mut logs = self.logs.write().await;
        logs.push(AppLog {
            id: Uuid::new_v4().to_string(),
            action: action.to_string(),
            group_id: group_id.map(String::from),
            member_id: member_id.map(String::from),
            details,
            timestamp: chrono::Utc::now(),
        });
        Ok(())
    }

    async fn get_logs(&self) -> Result<Vec<AppLog>, ServiceError> {
        let logs = self.logs.read().await;
        Ok(logs.clone())
    }

    async fn get_group_logs(&self, group_id: &str) -> Result<Vec<AppLog>, ServiceError> {
        let logs = self.logs.read().await;
        Ok(logs
            .iter()
            .filter(|log| log.group_id.as_deref() == Some(group_id))
            .cloned()
            .collect())
    }
}
