use crate::component::Component;
use crate::entity::Entity;
use crate::registry::SystemId;
use crate::world::World;

/// A unit of per-tick behaviour.
///
/// A system declares the component kinds it needs once; each tick it is
/// handed the entities that currently hold all of them. The list may be
/// empty, and entities in it may be destroyed by earlier work in the same
/// call, so implementations probe components rather than assume them.
pub trait System<C: Component> {
    fn name(&self) -> &'static str;

    /// Kinds an entity must hold to be handed to [`run`](Self::run).
    fn requires(&self) -> Vec<C::Kind>;

    fn run(&mut self, world: &mut World<C>, entities: &[Entity], delta: f32);
}

/// A closure-backed system, mainly for tests and small glue.
pub struct FnSystem<C: Component, F> {
    name: &'static str,
    requires: Vec<C::Kind>,
    run: F,
}

/// Wrap a closure as a [`System`].
pub fn system_fn<C, F>(
    name: &'static str,
    requires: impl IntoIterator<Item = C::Kind>,
    run: F,
) -> FnSystem<C, F>
where
    C: Component,
    F: FnMut(&mut World<C>, &[Entity], f32),
{
    FnSystem {
        name,
        requires: requires.into_iter().collect(),
        run,
    }
}

impl<C, F> System<C> for FnSystem<C, F>
where
    C: Component,
    F: FnMut(&mut World<C>, &[Entity], f32),
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn requires(&self) -> Vec<C::Kind> {
        self.requires.clone()
    }

    fn run(&mut self, world: &mut World<C>, entities: &[Entity], delta: f32) {
        (self.run)(world, entities, delta);
    }
}

/// An ordered list of systems to run each tick. Order is part of the
/// contract: each system sees the settled output of the ones before it.
pub struct SystemSchedule<C: Component> {
    systems: Vec<(SystemId, Box<dyn System<C>>)>,
    scratch: Vec<Entity>,
}

impl<C: Component> SystemSchedule<C> {
    pub fn new() -> Self {
        Self {
            systems: Vec::new(),
            scratch: Vec::new(),
        }
    }

    /// Register a system with the world and append it to the schedule.
    pub fn add_system<S: System<C> + 'static>(&mut self, world: &mut World<C>, system: S) -> SystemId {
        let id = world.register_system(system.name(), system.requires());
        self.systems.push((id, Box::new(system)));
        id
    }

    /// Run all systems in order. Every system runs, matched or not.
    pub fn run_all(&mut self, world: &mut World<C>, delta: f32) {
        let Self { systems, scratch } = self;
        for (id, system) in systems.iter_mut() {
            scratch.clear();
            scratch.extend_from_slice(world.matched(*id));
            tracing::trace!("Running '{}' over {} entities", system.name(), scratch.len());
            system.run(world, scratch, delta);
        }
    }

    /// Names in execution order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.systems.iter().map(|(_, system)| system.name())
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}

impl<C: Component> Default for SystemSchedule<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::tests::{Hp, TestComponent, TestKind};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn closure_system() {
        let mut world = World::<TestComponent>::new();
        world.insert_resource(0u32);

        let mut system = system_fn("count", [], |w: &mut World<TestComponent>, _: &[Entity], _| {
            *w.resource_mut::<u32>().unwrap() += 1;
        });
        system.run(&mut world, &[], 0.0);
        assert_eq!(*world.resource::<u32>().unwrap(), 1);
    }

    #[test]
    fn schedule_ordering() {
        let mut world = World::<TestComponent>::new();
        let log = Rc::new(RefCell::new(Vec::<u32>::new()));

        let mut schedule = SystemSchedule::new();
        for n in 1..=3 {
            let log = log.clone();
            schedule.add_system(
                &mut world,
                system_fn("log", [], move |_: &mut World<TestComponent>, _: &[Entity], _| {
                    log.borrow_mut().push(n)
                }),
            );
        }

        schedule.run_all(&mut world, 0.016);
        assert_eq!(*log.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn empty_match_still_runs() {
        let mut world = World::<TestComponent>::new();
        let seen = Rc::new(RefCell::new(None));

        let mut schedule = SystemSchedule::new();
        let sink = seen.clone();
        schedule.add_system(
            &mut world,
            system_fn("hp", [TestKind::Hp], move |_: &mut World<TestComponent>, e: &[Entity], _| {
                *sink.borrow_mut() = Some(e.len())
            }),
        );
        schedule.run_all(&mut world, 0.016);
        assert_eq!(*seen.borrow(), Some(0));
    }

    #[test]
    fn later_systems_see_earlier_spawns() {
        let mut world = World::<TestComponent>::new();
        let seen = Rc::new(RefCell::new(0usize));

        let mut schedule = SystemSchedule::new();
        schedule.add_system(
            &mut world,
            system_fn("spawner", [], |w: &mut World<TestComponent>, _: &[Entity], _| {
                w.spawn([Hp(1).into()]);
            }),
        );
        let sink = seen.clone();
        schedule.add_system(
            &mut world,
            system_fn("reader", [TestKind::Hp], move |_: &mut World<TestComponent>, e: &[Entity], _| {
                *sink.borrow_mut() = e.len()
            }),
        );

        schedule.run_all(&mut world, 0.016);
        assert_eq!(*seen.borrow(), 1);
        schedule.run_all(&mut world, 0.016);
        assert_eq!(*seen.borrow(), 2);
    }
}
