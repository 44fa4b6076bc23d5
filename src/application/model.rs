use crate::domain::payment_method::PaymentMethod;
use std::cell::RefCell;
use std::rc::Rc;

/// Event categories the model emits. Handlers subscribe per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    PaymentMethodAdded,
    ActivePaymentMethodChanged,
    AsyncDependenciesReady,
}

/// A state-change notification with its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelEvent {
    PaymentMethodAdded(PaymentMethod),
    ActivePaymentMethodChanged(PaymentMethod),
    AsyncDependenciesReady,
}

impl ModelEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ModelEvent::PaymentMethodAdded(_) => EventKind::PaymentMethodAdded,
            ModelEvent::ActivePaymentMethodChanged(_) => EventKind::ActivePaymentMethodChanged,
            ModelEvent::AsyncDependenciesReady => EventKind::AsyncDependenciesReady,
        }
    }
}

type Handler = Rc<RefCell<dyn FnMut(&ModelEvent)>>;

/// Construction options for [`CoordinationModel`].
#[derive(Debug, Clone, Default)]
pub struct ModelOptions {
    pub payment_methods: Vec<PaymentMethod>,
}

struct CoordinationState {
    payment_methods: Vec<PaymentMethod>,
    active_payment_method: Option<PaymentMethod>,
    pending_dependencies: u32,
}

/// Single source of truth for the checkout widget: registered payment
/// methods, the active selection, and the count of UI modules still running
/// asynchronous setup.
///
/// The model is fully synchronous. All operations take `&self` so handlers
/// invoked during an emission may re-enter the model; share it behind an
/// `Rc` for that. Emission is synchronous and ordered with the triggering
/// mutation, never deferred or batched.
pub struct CoordinationModel {
    state: RefCell<CoordinationState>,
    subscribers: RefCell<Vec<(EventKind, Handler)>>,
}

impl CoordinationModel {
    /// Creates a model seeded with an ordered sequence of payment methods.
    /// The first element becomes the active method; an empty sequence leaves
    /// the active method unset. The pending-dependency counter starts at
    /// zero.
    pub fn new(options: ModelOptions) -> Self {
        let active_payment_method = options.payment_methods.first().cloned();
        Self {
            state: RefCell::new(CoordinationState {
                payment_methods: options.payment_methods,
                active_payment_method,
                pending_dependencies: 0,
            }),
            subscribers: RefCell::new(Vec::new()),
        }
    }

    /// Registers a handler for one event kind. Handlers registered while an
    /// emission is in flight do not see that emission.
    pub fn subscribe(&self, kind: EventKind, handler: impl FnMut(&ModelEvent) + 'static) {
        self.subscribers
            .borrow_mut()
            .push((kind, Rc::new(RefCell::new(handler))));
    }

    /// Appends a payment method and promotes it to active. Duplicates are
    /// permitted; each entry is distinct by position.
    pub fn add_payment_method(&self, method: PaymentMethod) {
        self.state
            .borrow_mut()
            .payment_methods
            .push(method.clone());
        self.emit(ModelEvent::PaymentMethodAdded(method.clone()));
        self.change_active_payment_method(method);
    }

    /// Sets the active payment method. Membership in the registered sequence
    /// is not checked; that looseness is inherited behavior callers rely on.
    pub fn change_active_payment_method(&self, method: PaymentMethod) {
        self.state.borrow_mut().active_payment_method = Some(method.clone());
        self.emit(ModelEvent::ActivePaymentMethodChanged(method));
    }

    /// Returns a copy of the registered methods in insertion order.
    pub fn payment_methods(&self) -> Vec<PaymentMethod> {
        self.state.borrow().payment_methods.clone()
    }

    pub fn active_payment_method(&self) -> Option<PaymentMethod> {
        self.state.borrow().active_payment_method.clone()
    }

    pub fn pending_dependencies(&self) -> u32 {
        self.state.borrow().pending_dependencies
    }

    /// Records that a UI module has begun an asynchronous setup task.
    pub fn async_dependency_starting(&self) {
        self.state.borrow_mut().pending_dependencies += 1;
    }

    /// Records that one asynchronous setup task finished. Emits
    /// `AsyncDependenciesReady` exactly on the transition to zero; extra
    /// calls while already at zero neither underflow nor re-fire. Driving
    /// the counter back up and down to zero fires again.
    pub fn async_dependency_ready(&self) {
        let reached_zero = {
            let mut state = self.state.borrow_mut();
            if state.pending_dependencies == 0 {
                false
            } else {
                state.pending_dependencies -= 1;
                state.pending_dependencies == 0
            }
        };
        if reached_zero {
            self.emit(ModelEvent::AsyncDependenciesReady);
        }
    }

    fn emit(&self, event: ModelEvent) {
        let kind = event.kind();
        // Snapshot the matching handlers so none of the borrows are held
        // while handlers run; they may re-enter the model or subscribe.
        let matching: Vec<Handler> = self
            .subscribers
            .borrow()
            .iter()
            .filter(|(subscribed, _)| *subscribed == kind)
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        for handler in matching {
            (&mut *handler.borrow_mut())(&event);
        }
    }
}
