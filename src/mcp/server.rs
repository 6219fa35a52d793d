//! TPM MCP Server Implementation
//!
//! Implements the MCP server with all TPM tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::models::{parse_choice, CartItem, PressureRequest, RideStyle, RimType, ValidationError};
use crate::pressure::{MassUnit, PressureEstimator, PressureUnit};
use crate::tools::status::StatusTracker;
use crate::tools::{calculator, cart, catalog, reports};

const MASS_UNITS: [&str; 2] = ["kg", "lbs"];
const PRESSURE_UNITS: [&str; 2] = ["psi", "bar"];

/// TPM MCP Service
#[derive(Clone)]
pub struct TpmService {
    estimator: Arc<PressureEstimator>,
    status_tracker: Arc<StatusTracker>,
    report_dir: PathBuf,
    tool_router: ToolRouter<TpmService>,
}

impl TpmService {
    pub fn new(config: &Config) -> Self {
        Self {
            estimator: Arc::new(PressureEstimator::new(config.table)),
            status_tracker: Arc::new(StatusTracker::new(
                config.report_dir.clone(),
                config.table_source.to_string(),
            )),
            report_dir: config.report_dir.clone(),
            tool_router: Self::tool_router(),
        }
    }
}

fn invalid_params(e: impl ToString) -> McpError {
    McpError::invalid_params(e.to_string(), None)
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Calculator Parameter Structs
// ============================================================================

/// Bike setup shared by the calculator and report tools
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetupParams {
    /// Rider mass in `mass_unit`
    #[serde(default = "default_rider_mass")]
    pub rider_mass: f64,
    /// Bike mass in `mass_unit`
    #[serde(default = "default_bike_mass")]
    pub bike_mass: f64,
    /// "kg" or "lbs"
    #[serde(default = "default_mass_unit")]
    pub mass_unit: String,
    /// road, gravel, mtb-xc, mtb-trail, mtb-enduro, mtb-downhill
    #[serde(default = "default_ride_style")]
    pub ride_style: String,
    /// Front tire width in mm
    #[serde(default = "default_tire_width")]
    pub front_tire_width: f64,
    /// Rear tire width in mm
    #[serde(default = "default_tire_width")]
    pub rear_tire_width: f64,
    /// Inner rim width in mm
    #[serde(default = "default_rim_width")]
    pub inner_rim_width: f64,
    /// tubes, tubular, hooks, hookless
    #[serde(default = "default_rim_type")]
    pub rim_type: String,
    /// "psi" or "bar"
    #[serde(default = "default_pressure_unit")]
    pub pressure_unit: String,
}

fn default_rider_mass() -> f64 { PressureRequest::default().rider_mass }
fn default_bike_mass() -> f64 { PressureRequest::default().bike_mass }
fn default_mass_unit() -> String { "kg".to_string() }
fn default_ride_style() -> String { "road".to_string() }
fn default_tire_width() -> f64 { PressureRequest::default().front_tire_width }
fn default_rim_width() -> f64 { PressureRequest::default().inner_rim_width }
fn default_rim_type() -> String { "hooks".to_string() }
fn default_pressure_unit() -> String { "psi".to_string() }

impl SetupParams {
    /// Parse the string choices and build a request
    pub fn to_request(&self) -> Result<PressureRequest, ValidationError> {
        let styles: Vec<&str> = RideStyle::ALL.iter().map(|s| s.as_str()).collect();
        let rims: Vec<&str> = RimType::ALL.iter().map(|r| r.as_str()).collect();

        Ok(PressureRequest {
            rider_mass: self.rider_mass,
            bike_mass: self.bike_mass,
            mass_unit: parse_choice("mass_unit", &self.mass_unit, MassUnit::from_str, &MASS_UNITS)?,
            ride_style: parse_choice("ride_style", &self.ride_style, RideStyle::from_str, &styles)?,
            front_tire_width: self.front_tire_width,
            rear_tire_width: self.rear_tire_width,
            inner_rim_width: self.inner_rim_width,
            rim_type: parse_choice("rim_type", &self.rim_type, RimType::from_str, &rims)?,
            pressure_unit: parse_choice(
                "pressure_unit",
                &self.pressure_unit,
                PressureUnit::from_str,
                &PRESSURE_UNITS,
            )?,
        })
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculatePressureParams {
    #[serde(flatten)]
    pub setup: SetupParams,
    /// Front tire model from list_tires (informational)
    pub front_tire: Option<String>,
    /// Rear tire model from list_tires (informational)
    pub rear_tire: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CheckRimCompatibilityParams {
    pub front_tire_width: f64,
    pub rear_tire_width: f64,
    pub inner_rim_width: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertPressureParams {
    pub value: f64,
    /// "psi" or "bar"
    pub from: String,
    /// "psi" or "bar"
    pub to: String,
}

// ============================================================================
// Cart Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CartItemParams {
    pub name: String,
    pub price: f64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 { 1 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct OrderSummaryParams {
    pub items: Vec<CartItemParams>,
    pub promo_code: Option<String>,
}

// ============================================================================
// Report Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GenerateReportParams {
    #[serde(flatten)]
    pub setup: SetupParams,
    /// Lowest rider mass in the sweep
    #[serde(default = "default_sweep_min")]
    pub rider_mass_min: f64,
    /// Highest rider mass in the sweep
    #[serde(default = "default_sweep_max")]
    pub rider_mass_max: f64,
    /// Output file; relative paths go under the report directory
    pub output_path: Option<String>,
}

fn default_sweep_min() -> f64 { crate::models::RIDER_MASS_RANGE.min }
fn default_sweep_max() -> f64 { crate::models::RIDER_MASS_RANGE.max }

// ============================================================================
// Tool Router
// ============================================================================

#[tool_router]
impl TpmService {
    // --- Status ---

    #[tool(description = "Get the current status of the TPM service including build info, configuration, and process information")]
    fn tpm_status(&self) -> Result<CallToolResult, McpError> {
        json_result(&self.status_tracker.get_status())
    }

    #[tool(description = "Get instructions for recommending tire pressure. Call this when starting a session or when unsure how to use the calculator tools.")]
    fn pressure_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::PRESSURE_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(PRESSURE_INSTRUCTIONS)]))
    }

    // --- Calculator ---

    #[tool(description = "Recommend front and rear tire pressure for a rider, bike, ride style, tire widths, inner rim width and rim type. Returns psi or bar with at most one warning.")]
    fn calculate_tire_pressure(&self, Parameters(p): Parameters<CalculatePressureParams>) -> Result<CallToolResult, McpError> {
        let request = p.setup.to_request().map_err(invalid_params)?;
        let front_tire = calculator::resolve_tire_model("front_tire", p.front_tire.as_deref()).map_err(invalid_params)?;
        let rear_tire = calculator::resolve_tire_model("rear_tire", p.rear_tire.as_deref()).map_err(invalid_params)?;

        let mut result = calculator::calculate_tire_pressure(&self.estimator, request).map_err(invalid_params)?;
        result.front_tire = front_tire;
        result.rear_tire = rear_tire;
        self.status_tracker.record_estimate();
        json_result(&result)
    }

    #[tool(description = "Check each tire width against the inner rim width (compatible when the rim is 50-80% of the tire width)")]
    fn check_rim_compatibility(&self, Parameters(p): Parameters<CheckRimCompatibilityParams>) -> Result<CallToolResult, McpError> {
        let result = calculator::check_rim_compatibility(
            &self.estimator,
            p.front_tire_width,
            p.rear_tire_width,
            p.inner_rim_width,
        )
        .map_err(invalid_params)?;
        json_result(&result)
    }

    #[tool(description = "Convert a pressure value between psi and bar, rounded to one decimal")]
    fn convert_pressure(&self, Parameters(p): Parameters<ConvertPressureParams>) -> Result<CallToolResult, McpError> {
        let from = parse_choice("from", &p.from, PressureUnit::from_str, &PRESSURE_UNITS).map_err(invalid_params)?;
        let to = parse_choice("to", &p.to, PressureUnit::from_str, &PRESSURE_UNITS).map_err(invalid_params)?;
        let result = calculator::convert_pressure(p.value, from, to).map_err(invalid_params)?;
        json_result(&result)
    }

    // --- Catalog ---

    #[tool(description = "List ride styles with labels and pressure multipliers")]
    fn list_ride_styles(&self) -> Result<CallToolResult, McpError> {
        json_result(&catalog::list_ride_styles(&self.estimator))
    }

    #[tool(description = "List rim types with labels, pressure multipliers and maximum pressure")]
    fn list_rim_types(&self) -> Result<CallToolResult, McpError> {
        json_result(&catalog::list_rim_types(&self.estimator))
    }

    #[tool(description = "List the tire models offered by the calculator")]
    fn list_tires(&self) -> Result<CallToolResult, McpError> {
        json_result(&catalog::list_tires())
    }

    #[tool(description = "Get the optimal inner rim width chart for common tire sizes")]
    fn rim_width_chart(&self) -> Result<CallToolResult, McpError> {
        json_result(&catalog::rim_width_chart())
    }

    #[tool(description = "Get the calculator's default setup and the usual input ranges")]
    fn calculator_defaults(&self) -> Result<CallToolResult, McpError> {
        json_result(&catalog::calculator_defaults())
    }

    // --- Cart ---

    #[tool(description = "Compute subtotal, promo discount (SAVE20), shipping (free over $200), 8% tax and total for a cart")]
    fn calculate_order_summary(&self, Parameters(p): Parameters<OrderSummaryParams>) -> Result<CallToolResult, McpError> {
        let items: Vec<CartItem> = p
            .items
            .into_iter()
            .map(|i| CartItem { name: i.name, price: i.price, quantity: i.quantity })
            .collect();
        let result = cart::calculate_order_summary(&items, p.promo_code.as_deref()).map_err(invalid_params)?;
        json_result(&result)
    }

    // --- Reports ---

    #[tool(description = "Generate a PDF report of recommended pressure across a rider mass range (5-unit steps) with a chart. Relative paths are written under the report directory.")]
    fn generate_pressure_report(&self, Parameters(p): Parameters<GenerateReportParams>) -> Result<CallToolResult, McpError> {
        let request = p.setup.to_request().map_err(invalid_params)?;
        request.validate().map_err(invalid_params)?;
        reports::check_sweep_range(p.rider_mass_min, p.rider_mass_max).map_err(invalid_params)?;

        let file_name = p.output_path.unwrap_or_else(|| {
            chrono::Local::now()
                .format("tire_pressure_report_%Y%m%d_%H%M%S.pdf")
                .to_string()
        });
        let output_path = reports::resolve_output_path(&self.report_dir, &file_name);

        let result = reports::generate_pressure_report(
            &self.estimator,
            &request,
            p.rider_mass_min,
            p.rider_mass_max,
            &output_path,
        )
        .map_err(|e| McpError::internal_error(e, None))?;
        self.status_tracker.record_estimates(result.rows as u64);
        json_result(&result)
    }
}

#[tool_handler]
impl ServerHandler for TpmService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "tpm".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Tire Pressure Manager".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Tire Pressure Manager (TPM) - Bicycle tire pressure recommendations. \
                 IMPORTANT: Call pressure_instructions before the first recommendation. \
                 Calculator: calculate_tire_pressure, check_rim_compatibility, convert_pressure. \
                 Catalog: list_ride_styles, list_rim_types, list_tires, rim_width_chart, calculator_defaults. \
                 Cart: calculate_order_summary. \
                 Reports: generate_pressure_report (PDF sweep over rider mass). \
                 Status: tpm_status."
                    .into(),
            ),
        }
    }
}
