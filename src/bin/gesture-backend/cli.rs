use std::net::{IpAddr, Ipv4Addr};

use clap::{Parser, command};
use tether_gesture_control::actuator::ActuatorKind;

// Some defaults; some of which can be overriden via CLI args
const CONFIG_FILE_PATH: &str = "./gestures.json";
const TETHER_HOST: std::net::IpAddr = IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1));

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Where to load (and save) gesture config
    #[arg(long="gestureConfigPath",default_value_t=String::from(CONFIG_FILE_PATH))]
    pub config_path: String,

    /// The IP address of the MQTT broker (server)
    #[arg(long = "tether.host", default_value_t=TETHER_HOST)]
    pub tether_host: std::net::IpAddr,

    /// The Agent Role (type)
    #[arg(long="tether.role",default_value_t=String::from("gestureControl"))]
    pub agent_role: String,

    /// The Agent Group (ID)
    #[arg(long="tether.group",default_value_t=String::from("any"))]
    pub agent_group: String,

    /// Inject input natively on this machine, or publish actions via Tether
    #[arg(long = "actuator", value_enum, default_value_t = ActuatorKind::Tether)]
    pub actuator: ActuatorKind,

    /// Do not render or publish depth images
    #[arg(long = "depthImage.disable")]
    pub depth_image_disable: bool,

    #[arg(long = "loglevel",default_value_t=String::from("info"))]
    pub log_level: String,
}
