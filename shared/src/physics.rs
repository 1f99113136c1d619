//! Rapier simulation of the gallery.
//!
//! Owns every Rapier set and pipeline needed to simulate the single dynamic body in the scene
//! (the player) against the immutable gallery statics, and to run scene queries for picking.
//!
//! Design goals
//! - Deterministic: statics are inserted sorted by `id`.
//! - Engine callbacks stay here: sensor intersection events are drained after every step and
//!   only the ones involving the player's foot sensor reach the [`GroundSensor`].

use crossbeam_channel::Receiver;
use rapier3d::prelude::*;

use crate::{
    constants::{
        FOOT_SENSOR_HALF_EXTENTS, FOOT_SENSOR_OFFSET_Y, GRAVITY_MPS2, PLAYER_CAPSULE_HALF_HEIGHT,
        PLAYER_CAPSULE_RADIUS, PLAYER_FRICTION,
    },
    ground::GroundSensor,
    movement::{PlayerBody, Vec3},
    rapier::{WorldStaticDef, collider_from_def, unpack_frame_tag},
};

#[derive(Clone, Copy, Debug)]
struct PlayerHandles {
    body: RigidBodyHandle,
    foot_sensor: ColliderHandle,
}

pub struct GalleryPhysics {
    gravity: Vector<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    event_collector: ChannelEventCollector,
    collision_events: Receiver<CollisionEvent>,
    player: Option<PlayerHandles>,
}

impl GalleryPhysics {
    /// Build a world containing the given statics and no player.
    ///
    /// Scene queries only see the statics after the first [`GalleryPhysics::step`].
    pub fn build(mut defs: Vec<WorldStaticDef>) -> Self {
        // Ensure deterministic insertion order.
        defs.sort_by_key(|d| d.id);

        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();

        for def in defs.iter() {
            let iso = Isometry::from_parts(def.translation.into(), def.rotation);
            let rb_handle = bodies.insert(RigidBodyBuilder::fixed().pose(iso).build());
            colliders.insert_with_parent(collider_from_def(def), rb_handle, &mut bodies);
        }

        // Contact force events are never enabled, only intersection events are consumed.
        let (collision_send, collision_events) = crossbeam_channel::unbounded();
        let (contact_force_send, _) = crossbeam_channel::unbounded();

        log::info!("gallery physics built with {} statics", defs.len());

        Self {
            gravity: vector![0.0, -GRAVITY_MPS2, 0.0],
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            bodies,
            colliders,
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            event_collector: ChannelEventCollector::new(collision_send, contact_force_send),
            collision_events,
            player: None,
        }
    }

    /// Spawn the player body at `at`, replacing any previous player.
    ///
    /// The body is dynamic with every rotation locked, carries the walking capsule and the foot
    /// sensor hanging just below it.
    pub fn spawn_player(&mut self, at: Vec3) {
        if let Some(previous) = self.player.take() {
            self.bodies.remove(
                previous.body,
                &mut self.island_manager,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            );
        }

        let body = RigidBodyBuilder::dynamic()
            .translation(at)
            .lock_rotations()
            .build();
        let body = self.bodies.insert(body);

        let capsule = ColliderBuilder::capsule_y(PLAYER_CAPSULE_HALF_HEIGHT, PLAYER_CAPSULE_RADIUS)
            .friction(PLAYER_FRICTION)
            .restitution(0.0)
            .build();
        self.colliders
            .insert_with_parent(capsule, body, &mut self.bodies);

        let [hx, hy, hz] = FOOT_SENSOR_HALF_EXTENTS;
        let sensor = ColliderBuilder::cuboid(hx, hy, hz)
            .translation(vector![0.0, FOOT_SENSOR_OFFSET_Y, 0.0])
            .sensor(true)
            .density(0.0)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        let foot_sensor = self
            .colliders
            .insert_with_parent(sensor, body, &mut self.bodies);

        log::debug!("player spawned at {at:?}");
        self.player = Some(PlayerHandles { body, foot_sensor });
    }

    /// Mutable handle to the player body, `None` until [`GalleryPhysics::spawn_player`].
    pub fn player_body(&mut self) -> Option<RapierPlayerBody<'_>> {
        let handles = self.player?;
        self.bodies
            .get_mut(handles.body)
            .map(|body| RapierPlayerBody { body })
    }

    /// Current player position, `None` until [`GalleryPhysics::spawn_player`].
    pub fn player_translation(&self) -> Option<Vec3> {
        let handles = self.player?;
        let t = self.bodies.get(handles.body)?.translation();
        Some(Vec3::new(t.x, t.y, t.z))
    }

    /// Advance the simulation by `dt` seconds and feed foot sensor overlaps into `ground`.
    pub fn step(&mut self, dt: f32, ground: &mut GroundSensor) {
        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &(),
            &self.event_collector,
        );

        while let Ok(event) = self.collision_events.try_recv() {
            self.dispatch_sensor_event(event, ground);
        }
    }

    /// Cast a ray and return the catalog id of the first picture frame hit within `max_toi`.
    ///
    /// The player body and every sensor are ignored; any other collider in front of a frame
    /// blocks it.
    pub fn pick_frame(&self, origin: Vec3, direction: Vec3, max_toi: f32) -> Option<u32> {
        let direction = direction.try_normalize(f32::EPSILON)?;

        let mut filter = QueryFilter::default().exclude_sensors();
        if let Some(player) = &self.player {
            filter = filter.exclude_rigid_body(player.body);
        }

        let query = self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        );

        let ray = Ray::new(Point::from(origin), direction);
        let (handle, _toi) = query.cast_ray(&ray, max_toi, true)?;
        unpack_frame_tag(self.colliders.get(handle)?.user_data)
    }

    fn dispatch_sensor_event(&self, event: CollisionEvent, ground: &mut GroundSensor) {
        let Some(player) = &self.player else {
            return;
        };
        if !event.sensor() {
            return;
        }
        if event.collider1() != player.foot_sensor && event.collider2() != player.foot_sensor {
            return;
        }

        if event.started() {
            ground.on_enter();
        } else {
            ground.on_exit();
        }
    }
}

/// [`PlayerBody`] backed by a Rapier rigid body.
pub struct RapierPlayerBody<'a> {
    body: &'a mut RigidBody,
}

impl PlayerBody for RapierPlayerBody<'_> {
    fn linvel(&self) -> Vec3 {
        let v = self.body.linvel();
        Vec3::new(v.x, v.y, v.z)
    }

    fn set_linvel(&mut self, linvel: Vec3) {
        self.body.set_linvel(linvel, true);
    }

    fn translation(&self) -> Vec3 {
        let t = self.body.translation();
        Vec3::new(t.x, t.y, t.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::CATALOG,
        constants::{EYE_HEIGHT, MOVE_SPEED, PICK_DISTANCE, PLAYER_SPAWN},
        interaction::InteractionState,
        layout::gallery_statics,
        movement::{MovementController, Quat, eye_position},
    };

    const DT: f32 = 1.0 / 60.0;

    fn gallery_with_player() -> GalleryPhysics {
        let mut physics = GalleryPhysics::build(gallery_statics());
        physics.spawn_player(Vec3::from(PLAYER_SPAWN));
        physics
    }

    fn exploring() -> InteractionState {
        let mut state = InteractionState::default();
        state.set_locked(true);
        state
    }

    /// Run controller + physics for `frames` fixed steps.
    fn run(
        physics: &mut GalleryPhysics,
        controller: &mut MovementController,
        state: &InteractionState,
        frames: usize,
    ) {
        for _ in 0..frames {
            controller.step(physics.player_body().as_mut(), &Quat::identity(), state);
            physics.step(DT, &mut controller.ground);
        }
    }

    #[test]
    fn player_falls_onto_the_floor_and_is_grounded() {
        let mut physics = gallery_with_player();
        let mut controller = MovementController::default();
        assert!(!controller.ground.is_grounded());

        run(&mut physics, &mut controller, &exploring(), 180);

        assert!(controller.ground.is_grounded());
        // Floor top is y = 0.1 and the capsule reaches 1 m below its center.
        let y = physics.player_translation().unwrap().y;
        assert!((y - 1.1).abs() < 0.05, "resting height {y}");
    }

    #[test]
    fn jump_leaves_the_ground_and_lands_again() {
        let mut physics = gallery_with_player();
        let mut controller = MovementController::default();
        let state = exploring();
        run(&mut physics, &mut controller, &state, 180);
        let rest_y = physics.player_translation().unwrap().y;

        controller.keys.jump = true;
        let result = controller
            .step(physics.player_body().as_mut(), &Quat::identity(), &state)
            .unwrap();
        assert!(result.jumped);
        assert!(!controller.ground.is_grounded());
        physics.step(DT, &mut controller.ground);
        controller.keys.jump = false;

        let mut apex = rest_y;
        for _ in 0..150 {
            controller.step(physics.player_body().as_mut(), &Quat::identity(), &state);
            physics.step(DT, &mut controller.ground);
            apex = apex.max(physics.player_translation().unwrap().y);
        }

        assert!(apex > rest_y + 1.0, "apex {apex} from rest {rest_y}");
        assert!(controller.ground.is_grounded());
    }

    #[test]
    fn walking_forward_moves_along_negative_z() {
        let mut physics = gallery_with_player();
        let mut controller = MovementController::default();
        let state = exploring();
        run(&mut physics, &mut controller, &state, 120);
        let start = physics.player_translation().unwrap();

        controller.keys.forward = true;
        run(&mut physics, &mut controller, &state, 60);
        let end = physics.player_translation().unwrap();

        assert!(end.z < start.z - 3.0, "moved from {start:?} to {end:?}");
        assert!((end.x - start.x).abs() < 0.1);
    }

    #[test]
    fn eye_follows_the_body_after_the_step() {
        let mut physics = gallery_with_player();
        let mut controller = MovementController::default();
        let state = exploring();
        run(&mut physics, &mut controller, &state, 120);

        controller.keys.forward = true;
        let result = controller
            .step(physics.player_body().as_mut(), &Quat::identity(), &state)
            .unwrap();
        physics.step(DT, &mut controller.ground);

        // The eye computed before the step lags the integrated body by one step of walking.
        let stepped_eye = eye_position(physics.player_translation().unwrap());
        let lag = result.eye.unwrap().z - stepped_eye.z;
        assert!(lag > 0.5 * MOVE_SPEED * DT, "lag {lag}");
    }

    #[test]
    fn open_content_holds_the_player_in_place() {
        let mut physics = gallery_with_player();
        let mut controller = MovementController::default();
        run(&mut physics, &mut controller, &exploring(), 120);
        let start = physics.player_translation().unwrap();

        let mut state = exploring();
        state.open_content(CATALOG[0]);
        controller.keys.forward = true;
        run(&mut physics, &mut controller, &state, 60);
        let end = physics.player_translation().unwrap();

        assert!((end - start).norm() < 0.05, "drifted from {start:?} to {end:?}");
    }

    #[test]
    fn controller_is_a_no_op_before_spawn() {
        let mut physics = GalleryPhysics::build(gallery_statics());
        let mut controller = MovementController::default();
        controller.keys.forward = true;

        assert!(physics.player_body().is_none());
        let result = controller.step(physics.player_body().as_mut(), &Quat::identity(), &exploring());
        assert!(result.is_none());
        assert!(physics.player_translation().is_none());
    }

    #[test]
    fn pick_frame_hits_the_aimed_frame_only() {
        let mut physics = gallery_with_player();
        let mut controller = MovementController::default();
        run(&mut physics, &mut controller, &exploring(), 120);

        let eye = physics.player_translation().unwrap() + Vec3::new(0.0, EYE_HEIGHT, 0.0);
        for item in &CATALOG {
            let to_frame = item.translation() - eye;
            assert_eq!(
                physics.pick_frame(eye, to_frame, 20.0),
                Some(item.id),
                "{}",
                item.title
            );
        }

        // Straight up hits the ceiling, straight back leaves the hall.
        assert_eq!(physics.pick_frame(eye, Vec3::y(), 12.0), None);
        assert_eq!(physics.pick_frame(eye, Vec3::z(), 12.0), None);
        // The far frames hang beyond picking reach from the spawn point.
        let near = CATALOG[0].translation() - eye;
        let far = CATALOG[3].translation() - eye;
        assert_eq!(physics.pick_frame(eye, near, PICK_DISTANCE), Some(CATALOG[0].id));
        assert_eq!(physics.pick_frame(eye, far, PICK_DISTANCE), None);
        // Degenerate direction.
        assert_eq!(physics.pick_frame(eye, Vec3::zeros(), 12.0), None);
    }

    #[test]
    fn respawn_replaces_the_player() {
        let mut physics = gallery_with_player();
        physics.spawn_player(Vec3::new(0.0, 3.0, -20.0));
        let t = physics.player_translation().unwrap();
        assert_eq!(t, Vec3::new(0.0, 3.0, -20.0));
    }
}
