use crate::runtime::event::PickerAction;
use crate::runtime::scheduler::SchedulerCommand;

#[derive(Debug, Clone)]
pub enum Effect {
    Picker(PickerAction),
    Schedule(SchedulerCommand),
    RequestRender,
}
