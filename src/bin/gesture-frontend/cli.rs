use std::net::{IpAddr, Ipv4Addr};

use clap::{Parser, command};

const TETHER_HOST: std::net::IpAddr = IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1));

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// The IP address of the MQTT broker (server)
    #[arg(long = "tether.host", default_value_t=TETHER_HOST)]
    pub tether_host: std::net::IpAddr,

    /// How many frames of depth readout to keep in the graph
    #[arg(long = "historyLength", default_value_t = 300)]
    pub history_length: usize,

    #[arg(long = "loglevel",default_value_t=String::from("info"))]
    pub log_level: String,
}
