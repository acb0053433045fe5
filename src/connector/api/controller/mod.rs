pub mod execute_controller;
pub mod results_controller;
pub mod save_controller;

pub use execute_controller::{execute, ExecuteRequest, ExecuteResponse};
pub use results_controller::get_result;
pub use save_controller::{save, SaveRequest, SaveResponse};
