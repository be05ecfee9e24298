//! The photo under the annotations.
//!
//! Loading is asynchronous: a [`LoadImageRequest`] clears the canvas, then the
//! file is decoded on the IO task pool and polled each frame. Until the decode
//! finishes the photo is absent and the canvas uses its default surface.

mod backdrop;
mod decode;

pub use decode::{decode_photo, DecodedPhoto, PhotoError, IMAGE_EXTENSIONS};

use std::path::PathBuf;

use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy::tasks::{IoTaskPool, Task};
use futures_lite::future;

use crate::config::RememberImageDirRequest;
use crate::editor::canvas::handle_canvas_commands;
use crate::editor::{Canvas, CanvasCommand};

/// Message to open and decode an image file
#[derive(Message)]
pub struct LoadImageRequest {
    pub path: PathBuf,
}

/// Sent once a photo has been decoded and handed to the canvas
#[derive(Message, Debug, Clone)]
pub struct PhotoLoaded {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// A photo that is on screen.
pub struct LoadedPhoto {
    pub handle: Handle<Image>,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// A decode in flight.
pub struct PendingDecode {
    pub path: PathBuf,
    task: Task<Result<DecodedPhoto, PhotoError>>,
}

#[derive(Resource, Default)]
pub struct PhotoState {
    pub loaded: Option<LoadedPhoto>,
    pub pending: Option<PendingDecode>,
}

/// Last decode failure, shown in a dialog until dismissed
#[derive(Resource, Default)]
pub struct PhotoLoadError {
    pub message: Option<String>,
}

fn photo_to_image(photo: DecodedPhoto) -> Image {
    Image::new(
        Extent3d {
            width: photo.width,
            height: photo.height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        photo.pixels,
        TextureFormat::Rgba8UnormSrgb,
        default(),
    )
}

/// Start decoding requested files. A newer request replaces one in flight.
pub fn handle_load_requests(
    mut requests: MessageReader<LoadImageRequest>,
    mut state: ResMut<PhotoState>,
    mut canvas: ResMut<Canvas>,
    mut load_error: ResMut<PhotoLoadError>,
) {
    let Some(request) = requests.read().last() else {
        return;
    };

    info!("Loading image {:?}", request.path);
    canvas.begin_image_load();
    state.loaded = None;
    load_error.message = None;

    let path = request.path.clone();
    let task = IoTaskPool::get().spawn({
        let path = path.clone();
        async move { decode_photo(&path) }
    });
    state.pending = Some(PendingDecode { path, task });
}

/// Hand a finished decode to the canvas.
pub fn poll_decode_task(
    mut state: ResMut<PhotoState>,
    mut canvas: ResMut<Canvas>,
    mut images: ResMut<Assets<Image>>,
    mut load_error: ResMut<PhotoLoadError>,
    mut loaded_events: MessageWriter<PhotoLoaded>,
    mut remember_events: MessageWriter<RememberImageDirRequest>,
) {
    let Some(pending) = state.pending.as_mut() else {
        return;
    };
    let Some(result) = future::block_on(future::poll_once(&mut pending.task)) else {
        return;
    };
    state.pending = None;

    match result {
        Ok(photo) => {
            let (path, width, height) = (photo.path.clone(), photo.width, photo.height);
            info!("Loaded image {:?} ({}x{})", path, width, height);

            let handle = images.add(photo_to_image(photo));
            canvas.set_image(Some((width, height)));
            state.loaded = Some(LoadedPhoto {
                handle,
                path: path.clone(),
                width,
                height,
            });

            if let Some(dir) = path.parent() {
                remember_events.write(RememberImageDirRequest {
                    dir: dir.to_path_buf(),
                });
            }
            loaded_events.write(PhotoLoaded {
                path,
                width,
                height,
            });
        }
        Err(e) => {
            error!("{}", e);
            canvas.set_image(None);
            load_error.message = Some(e.to_string());
        }
    }
}

/// Clearing the canvas also drops the photo and any decode in flight. Runs
/// before polling so a decode finishing in the same frame is discarded.
pub fn handle_clear_command(
    mut commands: MessageReader<CanvasCommand>,
    mut state: ResMut<PhotoState>,
) {
    if commands
        .read()
        .any(|command| *command == CanvasCommand::ClearAll)
    {
        state.loaded = None;
        state.pending = None;
    }
}

pub struct PhotoPlugin;

impl Plugin for PhotoPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PhotoState>()
            .init_resource::<PhotoLoadError>()
            .add_message::<LoadImageRequest>()
            .add_message::<PhotoLoaded>()
            .add_systems(Startup, backdrop::spawn_backdrop)
            // After the canvas has applied this frame's commands
            .add_systems(
                Update,
                (
                    handle_clear_command.run_if(on_message::<CanvasCommand>),
                    handle_load_requests.run_if(on_message::<LoadImageRequest>),
                    poll_decode_task,
                    backdrop::sync_backdrop,
                )
                    .chain()
                    .after(handle_canvas_commands),
            );
    }
}
