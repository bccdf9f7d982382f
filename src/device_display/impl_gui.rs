use crate::device_display::interface::{DeviceDisplay, LineBuffer};
use crate::library::logger::interface::Logger;
use crate::library::panic::panic_message;
use eframe::egui;
use std::error::Error;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;
use winit::event_loop::EventLoopBuilder;

fn lock_frame(frame: &Mutex<LineBuffer>) -> MutexGuard<'_, LineBuffer> {
    match frame.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[derive(Clone)]
struct DisplayWindow {
    shown: Arc<Mutex<LineBuffer>>,
}

impl eframe::App for DisplayWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let shown = lock_frame(&self.shown).clone();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical(|ui| {
                ui.add_space(12.0);

                let border_color = egui::Color32::from_rgb(100, 100, 100);
                let bg_color = egui::Color32::from_rgb(20, 20, 20);

                let rect = ui.available_rect_before_wrap();
                ui.painter().rect_filled(rect, 0.0, bg_color);
                ui.painter()
                    .rect_stroke(rect, 0.0, egui::Stroke::new(2.0, border_color));

                for line in shown.lines() {
                    ui.label(
                        egui::RichText::new(line)
                            .monospace()
                            .color(egui::Color32::WHITE)
                            .size(16.0),
                    );
                }
            });
        });

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

pub struct DeviceDisplayGui {
    logger: Arc<dyn Logger + Send + Sync>,
    pending: LineBuffer,
    shown: Arc<Mutex<LineBuffer>>,
}

impl DeviceDisplayGui {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("device_display").with_namespace("gui"),
            pending: LineBuffer::new(),
            shown: Arc::new(Mutex::new(LineBuffer::new())),
        }
    }
}

fn native_options() -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([560.0, 360.0])
            .with_resizable(false),
        event_loop_builder: Some(Box::new(allow_any_thread)),
        ..Default::default()
    }
}

/// The window runs off the main thread, which winit refuses unless told otherwise.
#[allow(unused_variables)]
fn allow_any_thread<T: 'static>(builder: &mut EventLoopBuilder<T>) {
    #[cfg(target_os = "linux")]
    {
        use winit::platform::wayland::EventLoopBuilderExtWayland;
        use winit::platform::x11::EventLoopBuilderExtX11;

        EventLoopBuilderExtX11::with_any_thread(&mut *builder, true);
        EventLoopBuilderExtWayland::with_any_thread(&mut *builder, true);
    }

    #[cfg(target_os = "windows")]
    {
        use winit::platform::windows::EventLoopBuilderExtWindows;

        builder.with_any_thread(true);
    }
}

impl DeviceDisplay for DeviceDisplayGui {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let shown = self.shown.clone();
        let logger = self.logger.clone();

        // The window owns its own thread so the pipeline loop never blocks on it.
        thread::Builder::new()
            .name("pixel-vision-gui".into())
            .spawn(move || {
                let window = DisplayWindow { shown };

                let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                    eframe::run_native(
                        "PixelVision",
                        native_options(),
                        Box::new(|_cc| Box::new(window)),
                    )
                }));

                let _ = match outcome {
                    Ok(Ok(())) => logger.info("Window closed"),
                    Ok(Err(e)) => logger.error(&format!("Window failed: {}", e)),
                    Err(payload) => logger.error(&format!(
                        "Window thread panicked: {}",
                        panic_message(payload.as_ref())
                    )),
                };
            })?;

        Ok(())
    }

    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.pending.clear();
        Ok(())
    }

    fn write_line(&mut self, line: usize, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.pending.write_line(line, text)
    }

    fn flush(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        *lock_frame(&self.shown) = self.pending.clone();
        Ok(())
    }
}
