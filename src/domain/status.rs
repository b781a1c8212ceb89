/// State of the location subsystem, used to drive the rendered status line.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Status {
    #[default]
    Idle,
    /// The watch is running but no fix has been accepted yet.
    Acquiring,
    Fixed,
    /// Terminal; the watch has stopped and a restart is the only way out.
    Failed(String),
}
