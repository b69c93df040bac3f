//! Fingertip-versus-object collision.
//!
//! A hand touches an object when the object's box overlaps the boxes on
//! both the index tip and the thumb tip, i.e. the object sits between the
//! pinching fingers rather than merely brushing one of them.

use glam::{Mat3, Vec3};

use crate::error::GrabError;
use crate::geometry::OrientedBox;
use crate::hand::{HandJoint, HandModel};
use crate::options::GrabOptions;

/// Cubes centered on the index tip and the thumb tip, both oriented by the
/// hand frame.
///
/// # Errors
///
/// Whatever the hand model reports for missing or degenerate landmarks.
pub fn fingertip_boxes(
    model: &HandModel,
    half_extent: f32,
) -> Result<[OrientedBox; 2], GrabError> {
    let frame = model.frame()?;
    let rotation = frame.rotation_matrix();
    Ok([
        OrientedBox::cube(
            model.joint_position(HandJoint::IndexFingerTip)?,
            half_extent,
            rotation,
        ),
        OrientedBox::cube(
            model.joint_position(HandJoint::ThumbTip)?,
            half_extent,
            rotation,
        ),
    ])
}

/// Whether the hand is close enough for the box test to be worth running.
///
/// The reach is `cull_distance` beyond the box's bounding sphere, so large
/// objects can still be grabbed at their faces. A non-positive
/// `cull_distance` disables the check.
#[must_use]
pub fn within_reach(hand: Vec3, object: &OrientedBox, cull_distance: f32) -> bool {
    cull_distance <= 0.0
        || hand.distance(object.center)
            <= cull_distance + object.half_size.length()
}

/// Full grab test of one hand against one object box.
///
/// # Errors
///
/// Whatever the hand model reports; a miss is `Ok(false)`.
pub fn hand_touches(
    model: &HandModel,
    object: &OrientedBox,
    options: &GrabOptions,
) -> Result<bool, GrabError> {
    let hand = model.hand_position()?;
    if !within_reach(hand, object, options.proximity_cull_distance) {
        log::trace!(
            "{} hand {:.3} from object, culled",
            model.handedness().as_str(),
            hand.distance(object.center)
        );
        return Ok(false);
    }
    let [index_box, thumb_box] =
        fingertip_boxes(model, options.fingertip_half_extent)?;
    Ok(object.intersects(&index_box, options.obb_epsilon)
        && object.intersects(&thumb_box, options.obb_epsilon))
}

/// Object box for unit-scale geometry centered on `center`.
#[inline]
#[must_use]
pub fn unit_box(center: Vec3, half_size: Vec3) -> OrientedBox {
    OrientedBox::new(center, half_size, Mat3::IDENTITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::{
        Handedness, JointPose, Skeleton, TrackedJoint, TrackingMode,
    };

    /// Hand-tracked model whose four landmarks sit at the given points.
    fn tracked_hand(index_tip: Vec3, thumb_tip: Vec3) -> HandModel {
        let mut model = HandModel::with_skeleton(
            Handedness::Right,
            TrackingMode::HandTracking,
            Skeleton::from_poses(
                crate::hand::HandPose::Default.table(Handedness::Right),
            ),
        );
        let joints = [
            (HandJoint::IndexFingerTip, index_tip),
            (HandJoint::ThumbTip, thumb_tip),
            (HandJoint::IndexFingerMetacarpal, index_tip + Vec3::new(0.0, 0.02, 0.09)),
            (HandJoint::PinkyFingerMetacarpal, index_tip + Vec3::new(0.0, -0.04, 0.09)),
        ]
        .map(|(joint, p)| TrackedJoint {
            joint,
            pose: JointPose::at(p),
        });
        model.apply_tracked_joints(&joints).unwrap();
        model
    }

    #[test]
    fn object_between_fingertips_is_touched() {
        let model =
            tracked_hand(Vec3::new(-0.02, 0.0, 0.0), Vec3::new(0.02, 0.0, 0.0));
        let object = unit_box(Vec3::ZERO, Vec3::splat(0.05));
        assert!(hand_touches(&model, &object, &GrabOptions::default()).unwrap());
    }

    #[test]
    fn one_fingertip_is_not_enough() {
        // index tip brushes the box, thumb tip is well clear of it
        let model =
            tracked_hand(Vec3::new(0.06, 0.0, 0.0), Vec3::new(0.16, 0.0, 0.0));
        let object = unit_box(Vec3::ZERO, Vec3::splat(0.05));
        let options = GrabOptions {
            proximity_cull_distance: 0.0,
            ..GrabOptions::default()
        };
        assert!(!hand_touches(&model, &object, &options).unwrap());
    }

    #[test]
    fn far_hand_is_culled() {
        let model =
            tracked_hand(Vec3::new(0.99, 0.0, 0.0), Vec3::new(1.01, 0.0, 0.0));
        let object = unit_box(Vec3::ZERO, Vec3::splat(0.05));
        assert!(!hand_touches(&model, &object, &GrabOptions::default()).unwrap());
        assert!(!within_reach(Vec3::X, &object, 0.2));
        assert!(within_reach(Vec3::X, &object, 0.0));
    }

    #[test]
    fn large_object_is_reachable_at_its_face() {
        // 1 m cube, fingertips pinching just inside the +x face
        let model =
            tracked_hand(Vec3::new(0.44, 0.0, 0.0), Vec3::new(0.48, 0.0, 0.0));
        let object = unit_box(Vec3::ZERO, Vec3::splat(0.5));
        assert!(within_reach(Vec3::new(0.46, 0.0, 0.0), &object, 0.2));
        assert!(hand_touches(&model, &object, &GrabOptions::default()).unwrap());
        assert!(!within_reach(Vec3::new(1.1, 0.0, 0.0), &object, 0.2));
    }

    #[test]
    fn fingertip_boxes_follow_the_tips() {
        let index = Vec3::new(0.1, 1.0, -0.3);
        let thumb = Vec3::new(0.15, 1.0, -0.3);
        let model = tracked_hand(index, thumb);
        let [a, b] = fingertip_boxes(&model, 0.025).unwrap();
        assert_eq!(a.center, index);
        assert_eq!(b.center, thumb);
        assert_eq!(a.half_size, Vec3::splat(0.025));
        // box z axis runs from index tip toward thumb tip
        assert!((a.rotation.z_axis - Vec3::X).length() < 1e-6);
    }
}
