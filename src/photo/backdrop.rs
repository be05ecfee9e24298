//! Sprites behind the annotations: the photo itself, a checkerboard when no
//! photo is loaded, and the plain back side shown after a flip.

use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use crate::constants::{
    BACKGROUND_Z, CHECKER_SIZE, DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH, PHOTO_Z,
};
use crate::editor::{Canvas, PhotoSide};
use crate::theme;

use super::PhotoState;

/// Which backdrop sprite an entity is.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backdrop {
    Photo,
    Checkerboard,
    BackSide,
    BackBorder,
}

/// Border drawn around the back side (pixels).
const BACK_BORDER: f32 = 1.0;

/// Checkerboard filling the default surface.
pub fn create_checkerboard_image() -> Image {
    let width = DEFAULT_SURFACE_WIDTH as u32;
    let height = DEFAULT_SURFACE_HEIGHT as u32;
    let mut data = Vec::with_capacity((width * height * 4) as usize);

    for y in 0..height {
        for x in 0..width {
            let light = ((x / CHECKER_SIZE) + (y / CHECKER_SIZE)) % 2 == 0;
            let shade = if light {
                theme::CHECKER_LIGHT
            } else {
                theme::CHECKER_DARK
            };
            data.extend_from_slice(&[shade, shade, shade, 255]);
        }
    }

    Image::new(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        default(),
    )
}

pub fn spawn_backdrop(mut commands: Commands, mut images: ResMut<Assets<Image>>) {
    let checker = images.add(create_checkerboard_image());

    commands.spawn((
        Backdrop::Checkerboard,
        Sprite::from_image(checker),
        Transform::from_xyz(0.0, 0.0, BACKGROUND_Z),
    ));
    commands.spawn((
        Backdrop::Photo,
        Sprite::default(),
        Transform::from_xyz(0.0, 0.0, PHOTO_Z),
        Visibility::Hidden,
    ));
    commands.spawn((
        Backdrop::BackBorder,
        Sprite::from_color(theme::BACK_BORDER_COLOR, Vec2::ONE),
        Transform::from_xyz(0.0, 0.0, BACKGROUND_Z),
        Visibility::Hidden,
    ));
    commands.spawn((
        Backdrop::BackSide,
        Sprite::from_color(theme::BACK_SIDE_COLOR, Vec2::ONE),
        Transform::from_xyz(0.0, 0.0, PHOTO_Z),
        Visibility::Hidden,
    ));
}

/// Whether a backdrop sprite shows for the given side and photo presence.
pub fn backdrop_visible(backdrop: Backdrop, side: PhotoSide, has_photo: bool) -> bool {
    match (backdrop, side) {
        (Backdrop::Photo, PhotoSide::Front) => has_photo,
        (Backdrop::Checkerboard, PhotoSide::Front) => !has_photo,
        (Backdrop::BackSide | Backdrop::BackBorder, PhotoSide::Back) => true,
        _ => false,
    }
}

/// Keep backdrop sprites in step with the canvas side and the loaded photo.
pub fn sync_backdrop(
    canvas: Res<Canvas>,
    state: Res<PhotoState>,
    mut sprites: Query<(&Backdrop, &mut Sprite, &mut Visibility)>,
) {
    let side = canvas.display().side;
    let size = canvas.surface().size();
    let photo = state.loaded.as_ref().map(|loaded| &loaded.handle);

    for (backdrop, mut sprite, mut visibility) in sprites.iter_mut() {
        match backdrop {
            // A cleared photo must not stay referenced by the sprite
            Backdrop::Photo => match photo {
                Some(handle) if sprite.image != *handle => sprite.image = handle.clone(),
                None if sprite.image != Handle::default() => sprite.image = Handle::default(),
                _ => {}
            },
            Backdrop::BackSide => sprite.custom_size = Some(size),
            Backdrop::BackBorder => sprite.custom_size = Some(size + BACK_BORDER * 2.0),
            Backdrop::Checkerboard => {}
        }

        let new_visibility = if backdrop_visible(*backdrop, side, photo.is_some()) {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        if *visibility != new_visibility {
            *visibility = new_visibility;
        }
    }
}
