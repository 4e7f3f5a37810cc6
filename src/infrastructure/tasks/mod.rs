pub(crate) mod light_render;

pub(crate) use light_render::light_render_task;
