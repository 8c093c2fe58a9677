//! Field configuration and supplier balance API

use async_trait::async_trait;
use ombor_engine::FieldResolver;
use shared::error::{AppError, AppResult};
use shared::models::SupplierBalanceSnapshot;
use shared::pricing::{FieldConfigRequest, FieldConfigResponse};
use shared::response::ApiResponse;

use crate::http::unwrap_data;
use crate::{ClientResult, HttpClient};

/// Pricing API: field configuration, exchange rates and supplier balances
#[derive(Debug, Clone)]
pub struct PricingApi {
    http: HttpClient,
}

impl PricingApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Fetch the field configuration for one purchase context
    pub async fn field_config(
        &self,
        request: &FieldConfigRequest,
    ) -> ClientResult<FieldConfigResponse> {
        let envelope: ApiResponse<FieldConfigResponse> = self
            .http
            .post("api/pricing/field-config", request)
            .await?;
        unwrap_data(envelope)
    }

    /// Fetch a supplier's balance snapshot
    pub async fn supplier_balance(&self, supplier: i64) -> ClientResult<SupplierBalanceSnapshot> {
        let envelope: ApiResponse<SupplierBalanceSnapshot> = self
            .http
            .get(&format!("api/suppliers/{supplier}/balance"))
            .await?;
        unwrap_data(envelope)
    }

    /// Fetch the live USD exchange rate, if the backend has one
    pub async fn usd_rate(&self) -> ClientResult<Option<f64>> {
        let envelope: ApiResponse<Option<f64>> = self.http.get("api/currencies/usd-rate").await?;
        if !envelope.is_success() {
            return Err(crate::ClientError::Api {
                code: envelope.code,
                message: envelope.message,
            });
        }
        Ok(envelope.data.flatten())
    }
}

#[async_trait]
impl FieldResolver for PricingApi {
    async fn resolve(&self, request: FieldConfigRequest) -> AppResult<FieldConfigResponse> {
        self.field_config(&request).await.map_err(|err| {
            tracing::warn!("field configuration request failed: {err}");
            AppError::network(err.to_string())
        })
    }
}
