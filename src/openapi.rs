use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Warehouse API",
        version = "1.0.0",
        description = r#"
Warehouse management backend for SKUs, RFID-tagged stock instances, storage
positions, restock orders, and internal orders.

Restock orders move through ISSUED, DELIVERY, DELIVERED, TESTED, and finally
COMPLETED or COMPLETEDRETURN. Delivered instances attach while an order sits
in DELIVERED, the transport note while it sits in DELIVERY, and the return
items of a COMPLETEDRETURN order can be read back out.

Validation failures and wrong-state operations answer 422, dangling ids 404,
and datastore failures 503.
"#,
        license(name = "MIT")
    ),
    paths(
        handlers::restock_orders::list_restock_orders,
        handlers::restock_orders::get_restock_order,
        handlers::restock_orders::get_return_items,
        handlers::restock_orders::create_restock_order,
        handlers::restock_orders::change_restock_order_state,
        handlers::restock_orders::attach_sku_items,
        handlers::restock_orders::attach_transport_note,
        handlers::restock_orders::delete_restock_order,
        handlers::positions::list_positions,
        handlers::positions::create_position,
        handlers::positions::modify_position,
        handlers::positions::change_position_id,
        handlers::positions::delete_position,
        handlers::skus::list_skus,
        handlers::skus::get_sku,
        handlers::skus::create_sku,
        handlers::skus::modify_sku,
        handlers::skus::assign_sku_position,
        handlers::skus::delete_sku,
    ),
    components(schemas(
        crate::errors::ErrorResponse,
        crate::entities::RestockOrderState,
        crate::entities::InternalOrderState,
        handlers::restock_orders::CreateRestockOrderRequest,
        handlers::restock_orders::OrderProductRequest,
        handlers::restock_orders::ChangeStateRequest,
        handlers::restock_orders::CompletedProductRequest,
        handlers::restock_orders::AttachSkuItemsRequest,
        handlers::restock_orders::SkuItemRequest,
        handlers::restock_orders::AttachTransportNoteRequest,
        handlers::restock_orders::TransportNote,
        handlers::restock_orders::RestockOrderResponse,
        handlers::restock_orders::OrderProductResponse,
        handlers::restock_orders::OrderSkuItemResponse,
        handlers::positions::CreatePositionRequest,
        handlers::positions::ModifyPositionRequest,
        handlers::positions::ChangePositionIdRequest,
        handlers::positions::PositionResponse,
        handlers::skus::CreateSkuRequest,
        handlers::skus::ModifySkuRequest,
        handlers::skus::AssignPositionRequest,
        handlers::skus::SkuResponse,
    )),
    tags(
        (name = "restock-orders", description = "Restock order lifecycle"),
        (name = "positions", description = "Storage position ledger"),
        (name = "skus", description = "SKU catalog and capacity propagation"),
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
