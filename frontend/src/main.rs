use log::{info, Level};
use web_sys::window;

mod config;
mod call {
    pub mod dispatch;
    pub mod error;
    pub mod phone;
    pub mod state;
}
mod components {
    pub mod call_widget;
}

use components::call_widget::{CallWidget, CallWidgetProps};
use config::{WidgetConfig, MOUNT_ELEMENT_ID};

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    let root = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(MOUNT_ELEMENT_ID));

    // Pages without the mount point simply don't get the widget.
    let Some(root) = root else {
        info!("No #{} on this page, call widget not mounted", MOUNT_ELEMENT_ID);
        return;
    };

    let config = WidgetConfig::from_attributes(|name| root.get_attribute(name));
    info!("Mounting call widget, webhook {}", config.webhook_url);
    yew::Renderer::<CallWidget>::with_root_and_props(root, CallWidgetProps { config }).render();
}
