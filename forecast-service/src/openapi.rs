use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use common::models::{
    Condition, DailyView, DashboardResponse, ForecastSample, ForecastSeries, HourlyView,
    Location, LocationView, Temperature, TodayView,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::get_dashboard,
        handlers::get_series,
    ),
    components(schemas(
        DashboardResponse,
        LocationView,
        TodayView,
        HourlyView,
        DailyView,
        ForecastSeries,
        ForecastSample,
        Location,
        Condition,
        Temperature,
    )),
    tags(
        (name = "forecast", description = "Forecast dashboard endpoints"),
    ),
)]
struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
