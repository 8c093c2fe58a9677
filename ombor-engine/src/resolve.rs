//! Field configuration resolution
//!
//! Asks the external pricing/configuration service which fields are editable
//! vs. derived for a (store, product, currency, purchase-unit, supplier,
//! date) tuple and what conversion factor / exchange rate apply, then merges
//! the answer into the line item.
//!
//! There is deliberately no request sequencing or cancellation: a slow
//! response to a superseded selection can apply outdated metadata to the
//! now-current line state. The per-item `Resolving` latch only prevents
//! overlapping duplicate requests. This mirrors the behavior of the system
//! this engine reconciles with; callers that need stronger guarantees must
//! drop the item and re-resolve.

use async_trait::async_trait;
use shared::dynamic::DynamicValue;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::fields::{FieldDescriptor, FieldName};
use shared::models::{CalcMetadata, EntryContext, LineItem, LineStatus};
use shared::pricing::{FieldConfigRequest, FieldConfigResponse};

use crate::money::parse_amount;
use rust_decimal::prelude::ToPrimitive;

/// Async seam to the pricing/configuration service
#[async_trait]
pub trait FieldResolver: Send + Sync {
    /// Fetch field configuration for one purchase context. Read-only
    /// against the remote service.
    async fn resolve(&self, request: FieldConfigRequest) -> AppResult<FieldConfigResponse>;
}

/// Build a resolver request from the entry context and one line item.
///
/// Every context value is required; a missing one is the guard error
/// `ConfigContextIncomplete` and the network call must not be made. The
/// session layer treats this as a silent skip, not a user-facing failure.
pub fn build_request(ctx: &EntryContext, item: &LineItem) -> AppResult<FieldConfigRequest> {
    let store = ctx
        .store
        .ok_or_else(|| AppError::context_incomplete("store"))?;
    let supplier = ctx
        .supplier
        .ok_or_else(|| AppError::context_incomplete("supplier"))?;
    let date_of_arrived = ctx
        .date_of_arrived
        .clone()
        .ok_or_else(|| AppError::context_incomplete("date_of_arrived"))?;
    let product = require_reference(item, FieldName::Product)?;
    let currency = require_reference(item, FieldName::Currency)?;
    let purchase_unit = require_reference(item, FieldName::PurchaseUnit)?;

    Ok(FieldConfigRequest {
        store,
        product,
        currency,
        purchase_unit,
        supplier,
        date_of_arrived,
    })
}

fn require_reference(item: &LineItem, name: FieldName) -> AppResult<i64> {
    item.field(name)
        .and_then(|v| v.trim().parse::<i64>().ok())
        .ok_or_else(|| AppError::context_incomplete(name.as_str()))
}

/// Resolve one line item against the pricing service and merge the result.
///
/// On failure the item is set to `Error` status with every existing field
/// value left untouched; on success the descriptors and metadata are merged
/// per the non-overwrite rules and the item becomes `Resolved`.
pub async fn resolve_item(
    resolver: &dyn FieldResolver,
    ctx: &EntryContext,
    item: &mut LineItem,
) -> AppResult<()> {
    if item.status == LineStatus::Resolving {
        return Err(AppError::new(ErrorCode::ConfigResolveInFlight));
    }
    let request = build_request(ctx, item)?;

    item.status = LineStatus::Resolving;
    match resolver.resolve(request).await {
        Ok(response) => {
            merge_response(item, &response);
            item.status = LineStatus::Resolved;
            Ok(())
        }
        Err(err) => {
            tracing::warn!(
                item = %item.id,
                code = %err.code,
                "field configuration fetch failed: {}",
                err.message
            );
            item.status = LineStatus::Error;
            Err(AppError::with_message(ErrorCode::ConfigFetchFailed, err.message))
        }
    }
}

/// Merge a resolver response into the line item.
///
/// Descriptor values are authoritative only while the item's field is still
/// empty; a held user- or calculation-derived value is never overwritten by
/// a later fetch, so re-resolution is idempotent. The merged descriptor
/// list always contains `purchase_unit_quantity`, even when the remote
/// response omits it, since downstream code iterates a complete field order.
pub fn merge_response(item: &mut LineItem, response: &FieldConfigResponse) {
    let mut descriptors: Vec<FieldDescriptor> = Vec::new();

    for &name in FieldName::ALL.iter() {
        let Some(spec) = response.dynamic_fields.get(name.as_str()) else {
            continue;
        };
        descriptors.push(FieldDescriptor {
            name,
            label: if spec.label.is_empty() {
                name.as_str().to_string()
            } else {
                spec.label.clone()
            },
            editable: spec.editable,
            visible: spec.show,
            value: DynamicValue::extract(&spec.value),
        });
    }
    for key in response.dynamic_fields.keys() {
        if FieldName::from_wire(key).is_none() {
            tracing::debug!(field = %key, "ignoring unknown dynamic field");
        }
    }

    // Downstream code iterates a complete field order; the purchase-unit
    // quantity descriptor must exist even when the remote omits it.
    if !descriptors
        .iter()
        .any(|d| d.name == FieldName::PurchaseUnitQuantity)
    {
        descriptors.push(FieldDescriptor::fallback(
            FieldName::PurchaseUnitQuantity,
            item.field(FieldName::PurchaseUnitQuantity),
        ));
    }

    // Fill-if-empty: descriptor values never clobber a held value
    for descriptor in &descriptors {
        if let Some(value) = &descriptor.value {
            if item.field(descriptor.name).is_none() {
                item.set_field(descriptor.name, value.clone());
            }
        }
    }

    item.metadata = Some(CalcMetadata {
        conversion_factor: extract_number(response, "conversion_factor").unwrap_or(1.0),
        exchange_rate: extract_number(response, FieldName::ExchangeRate.as_str())
            .unwrap_or(1.0),
        is_base_currency: response.currency.is_base,
    });
    item.descriptors = descriptors;
}

fn extract_number(response: &FieldConfigResponse, key: &str) -> Option<f64> {
    let spec = response.dynamic_fields.get(key)?;
    DynamicValue::extract(&spec.value)
        .and_then(|raw| parse_amount(&raw))
        .and_then(|d| d.to_f64())
}
