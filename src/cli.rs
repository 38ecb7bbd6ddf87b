/// command line of the binary
pub mod args;
/// interactive console menu and the batch dataset run
pub mod cli_main;
