//! Data models
//!
//! Request/response types for the calculator, catalog data, and the cart.

mod cart;
mod request;
mod result;
mod ride_style;
mod rim_type;
mod tire;

pub use cart::{
    calculate_order_summary, find_promo_code, CartItem, OrderSummary, PromoCode,
    FLAT_SHIPPING, FREE_SHIPPING_THRESHOLD, TAX_RATE,
};
pub use request::{
    parse_choice, require_non_negative, require_positive, PressureRequest, ValidationError,
};
pub use result::{PressureResult, PressureWarning};
pub use ride_style::RideStyle;
pub use rim_type::RimType;
pub use tire::{
    find_tire_model, rim_width_chart, InputRange, RimChartRow, BIKE_MASS_RANGE,
    RIDER_MASS_RANGE, RIM_WIDTH_RANGE, TIRE_MODELS, TIRE_WIDTH_RANGE,
};
