use crate::api::health::HealthResponse;
use crate::api::properties::PropertyListParams;
use crate::api::services::ServiceListParams;
use crate::api::work_orders_api::WorkOrderListParams;
use models_preservation::catalog::ServiceDefinition;
use models_preservation::organization::Organization;
use models_preservation::property::{
    CreatePropertyRequest, Property, PropertyWithWorkOrderCount, UpdatePropertyRequest,
};
use models_preservation::user::{
    CurrentUserResponse, Session, SignInRequest, SignUpRequest, UserProfile,
};
use models_preservation::work_order::{
    AddProgressRequest, CreateWorkOrderRequest, CreatedWorkOrder, LifecycleActionRequest,
    ProgressEntry, ServiceLine, ServiceSelection, UpdateWorkOrderRequest, WorkOrder,
    WorkOrderDetail,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::health::health,
        crate::api::auth::signup,
        crate::api::auth::signin,
        crate::api::me::current_user,
        crate::api::services::list_services,
        crate::api::properties::list_properties,
        crate::api::properties::create_property,
        crate::api::properties::get_property,
        crate::api::properties::patch_property,
        crate::api::properties::delete_property,
        crate::api::work_orders_api::list_work_orders,
        crate::api::work_orders_api::create_work_order,
        crate::api::work_orders_api::get_work_order,
        crate::api::work_orders_api::patch_work_order,
        crate::api::work_orders_api::delete_work_order,
        crate::api::work_orders_api::accept_work_order,
        crate::api::work_orders_api::decline_work_order,
        crate::api::work_orders_api::start_work_order,
        crate::api::work_orders_api::complete_work_order,
        crate::api::work_orders_api::get_progress,
        crate::api::work_orders_api::post_progress,
    ),
    components(
        schemas(
            HealthResponse,
            SignUpRequest,
            SignInRequest,
            Session,
            UserProfile,
            Organization,
            CurrentUserResponse,
            ServiceDefinition,
            ServiceListParams,
            Property,
            PropertyWithWorkOrderCount,
            PropertyListParams,
            CreatePropertyRequest,
            UpdatePropertyRequest,
            WorkOrder,
            WorkOrderDetail,
            WorkOrderListParams,
            ServiceLine,
            ServiceSelection,
            ProgressEntry,
            CreateWorkOrderRequest,
            CreatedWorkOrder,
            UpdateWorkOrderRequest,
            LifecycleActionRequest,
            AddProgressRequest,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Account and session endpoints"),
        (name = "services", description = "The offerable service catalog"),
        (name = "properties", description = "Property submission and management"),
        (name = "work-orders", description = "Work order creation, lifecycle and progress")
    ),
    info(
        title = "Preservation Service API",
        description = "API for submitting properties and work orders and tracking them through the preservation lifecycle",
        version = "0.1.0"
    )
)]
#[derive(Debug)]
pub struct ApiDoc;
