/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound ports (driven ports) describe what the application core needs
/// from the outside world: the compliance service and a progress channel.
pub mod outbound;
