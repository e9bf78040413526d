pub mod launcher;
pub mod notify_send;

pub use launcher::XdgOpenLauncher;
pub use notify_send::NotifySendSurface;
