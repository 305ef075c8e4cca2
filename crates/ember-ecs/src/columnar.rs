//! Column-per-field component layout.
//!
//! A columnar component keeps each field in its own vector, so systems that
//! sweep one field across many entities touch contiguous memory. Access goes
//! through generated view structs holding one reference per field.

/// Declare a columnar component.
///
/// Generates the record struct, its column store, a shared view and an
/// exclusive view, and implements [`Component`](crate::Component) for the
/// record. Field types must implement `Default`, `Clone`, `Send` and `Sync`.
///
/// ```ignore
/// columnar_component! {
///     #[derive(Debug, Clone, Copy, PartialEq, Default)]
///     pub struct Position {
///         pub x: f32,
///         pub y: f32,
///     }
///     storage = PositionColumns;
///     view = PositionRef;
///     view_mut = PositionMut;
/// }
/// ```
#[macro_export]
macro_rules! columnar_component {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$fmeta:meta])* $fvis:vis $field:ident : $fty:ty ),+ $(,)?
        }
        storage = $columns:ident;
        view = $view:ident;
        view_mut = $view_mut:ident;
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $(#[$fmeta])* $fvis $field: $fty, )+
        }

        #[doc = concat!("Column-per-field storage for [`", stringify!($name), "`].")]
        $vis struct $columns {
            slots: $crate::__private::Slots,
            $( $field: ::std::vec::Vec<$fty>, )+
        }

        #[doc = concat!("Shared view of one entity's [`", stringify!($name), "`].")]
        #[derive(Debug, Clone, Copy)]
        $vis struct $view<'a> {
            $( pub $field: &'a $fty, )+
        }

        impl $view<'_> {
            /// Copy the fields out into an owned record.
            pub fn load(&self) -> $name {
                $name {
                    $( $field: ::std::clone::Clone::clone(self.$field), )+
                }
            }
        }

        #[doc = concat!("Exclusive view of one entity's [`", stringify!($name), "`].")]
        #[derive(Debug)]
        $vis struct $view_mut<'a> {
            $( pub $field: &'a mut $fty, )+
        }

        impl $view_mut<'_> {
            /// Copy the fields out into an owned record.
            pub fn load(&self) -> $name {
                $name {
                    $( $field: ::std::clone::Clone::clone(&*self.$field), )+
                }
            }

            /// Overwrite every field.
            pub fn store(&mut self, value: $name) {
                $( *self.$field = value.$field; )+
            }
        }

        impl $columns {
            /// Entity indices with this component attached, with the slot
            /// each one's fields live at.
            pub fn slots(&self) -> &$crate::__private::Slots {
                &self.slots
            }
        }

        impl $crate::Storage for $columns {
            type Item = $name;
            type Ref<'a> = $view<'a> where Self: 'a;
            type Mut<'a> = $view_mut<'a> where Self: 'a;

            fn with_indexing(indexing: $crate::Indexing) -> Self {
                let slots = $crate::__private::Slots::new(indexing);
                let reserved = slots.reserved();
                Self {
                    $( $field: {
                        let mut column = ::std::vec::Vec::new();
                        column.resize_with(reserved, <$fty as ::std::default::Default>::default);
                        column
                    }, )+
                    slots,
                }
            }

            fn attach(&mut self, index: u32, value: $name) {
                let placement = self.slots.place(index);
                $( $crate::__private::put(&mut self.$field, placement, value.$field); )+
            }

            fn detach(&mut self, index: u32) -> bool {
                let ::std::option::Option::Some(vacancy) = self.slots.vacate(index) else {
                    return false;
                };
                $( $crate::__private::vacate(&mut self.$field, vacancy); )+
                true
            }

            fn has(&self, index: u32) -> bool {
                self.slots.contains(index)
            }

            fn get(&self, index: u32) -> ::std::option::Option<$view<'_>> {
                let slot = self.slots.slot(index)?;
                ::std::option::Option::Some($view {
                    $( $field: &self.$field[slot], )+
                })
            }

            fn get_mut(&mut self, index: u32) -> ::std::option::Option<$view_mut<'_>> {
                let slot = self.slots.slot(index)?;
                ::std::option::Option::Some($view_mut {
                    $( $field: &mut self.$field[slot], )+
                })
            }

            fn len(&self) -> usize {
                self.slots.len()
            }

            fn indexing(&self) -> $crate::Indexing {
                self.slots.indexing()
            }
        }

        impl $crate::Component for $name {
            type Storage = $columns;
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{Indexing, Storage};

    crate::columnar_component! {
        #[derive(Debug, Clone, Copy, PartialEq, Default)]
        pub struct Sample {
            pub a: f32,
            pub b: u16,
        }
        storage = SampleColumns;
        view = SampleRef;
        view_mut = SampleMut;
    }

    fn both_layouts() -> [SampleColumns; 2] {
        [
            SampleColumns::with_indexing(Indexing::Dense { reserve: 8 }),
            SampleColumns::with_indexing(Indexing::Sparse),
        ]
    }

    #[test]
    fn attach_get_detach() {
        for mut store in both_layouts() {
            store.attach(3, Sample { a: 1.5, b: 7 });
            store.attach(4, Sample { a: 2.5, b: 8 });
            let view = store.get(3).unwrap();
            assert_eq!(*view.a, 1.5);
            assert_eq!(*view.b, 7);
            assert_eq!(view.load(), Sample { a: 1.5, b: 7 });

            assert!(store.detach(3));
            assert!(!store.has(3));
            assert!(store.get(3).is_none());
            assert_eq!(store.get(4).unwrap().load(), Sample { a: 2.5, b: 8 });
            assert_eq!(store.len(), 1);
        }
    }

    #[test]
    fn fields_are_written_through_views() {
        for mut store in both_layouts() {
            store.attach(0, Sample::default());
            {
                let mut view = store.get_mut(0).unwrap();
                *view.a += 4.0;
                *view.b = 2;
                assert_eq!(view.load(), Sample { a: 4.0, b: 2 });
                view.store(Sample { a: 9.0, b: 9 });
            }
            assert_eq!(store.get(0).unwrap().load(), Sample { a: 9.0, b: 9 });
        }
    }

    #[test]
    fn dense_detach_clears_slot_for_reuse() {
        let mut store = SampleColumns::with_indexing(Indexing::Dense { reserve: 2 });
        store.attach(1, Sample { a: 3.0, b: 3 });
        store.detach(1);
        assert_eq!(store.slots().len(), 0);
        assert!(store.get(1).is_none());
        store.attach(1, Sample { a: 0.5, b: 1 });
        assert_eq!(store.get(1).unwrap().load(), Sample { a: 0.5, b: 1 });
    }
}
