pub(super) mod input_line;
pub(super) mod status;
pub(super) mod task_list;
pub(super) mod util;
