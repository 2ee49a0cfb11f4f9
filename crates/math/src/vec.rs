use core::ops;

use bytemuck::{Pod, Zeroable};

macro_rules! vec_op_impl {
    ($trait: ident, $func: ident, $v: ident, $($e: ident),*) => {
        impl ops::$trait<$v> for $v {
            type Output = $v;

            #[inline]
            fn $func(self, rhs: $v) -> $v {
                $v { $( $e: self.$e.$func(rhs.$e), )* }
            }
        }
    }
}

macro_rules! scalar_op_impl {
    ($trait: ident, $func: ident, $v: ident, $($e: ident),*) => {
        impl ops::$trait<f32> for $v {
            type Output = $v;

            #[inline]
            fn $func(self, rhs: f32) -> $v {
                $v { $( $e: self.$e.$func(rhs), )* }
            }
        }

        impl ops::$trait<$v> for f32 {
            type Output = $v;

            #[inline]
            fn $func(self, rhs: $v) -> $v {
                $v { $( $e: self.$func(rhs.$e), )* }
            }
        }
    }
}

macro_rules! vec_impl {
    ($v: ident, $n: expr, $($e: ident),*) => {

        #[derive(Debug, Default, Copy, Clone, PartialEq, Pod, Zeroable)]
        #[repr(C)]
        pub struct $v {
            $( pub $e : f32, )*
        }

        impl $v {
            pub const ZERO: $v = $v { $( $e: 0.0, )* };

            #[inline]
            pub const fn new($( $e: f32, )*) -> $v {
                $v { $( $e, )* }
            }

            #[inline]
            pub fn from_scalar(a: f32) -> $v {
                $v { $( $e : a, )* }
            }

            #[inline]
            pub fn to_slice(self) -> [f32; $n] {
                bytemuck::cast(self)
            }

            #[inline]
            pub fn dot(self, b: $v) -> f32 {
                // -0.0 is the additive identity llvm is allowed to fold away.
                $( self.$e * b.$e + )* (-0.0)
            }

            #[inline]
            pub fn length2(self) -> f32 {
                $v::dot(self, self)
            }

            #[inline]
            pub fn length(self) -> f32 {
                $v::length2(self).sqrt()
            }

            #[inline]
            pub fn normalized(self) -> $v {
                self * (1.0 / $v::length(self))
            }
        }

        impl ops::Neg for $v {
            type Output = $v;

            fn neg(self) -> $v {
                $v { $( $e: -self.$e, )* }
            }
        }

        vec_op_impl!(Add, add, $v, $($e),*);
        vec_op_impl!(Sub, sub, $v, $($e),*);
        vec_op_impl!(Mul, mul, $v, $($e),*);

        scalar_op_impl!(Mul, mul, $v, $($e),*);
        scalar_op_impl!(Div, div, $v, $($e),*);
    }
}

vec_impl!(Vec2, 2, x, y);
vec_impl!(Vec3, 3, x, y, z);
vec_impl!(Vec4, 4, x, y, z, w);

impl Vec3 {
    #[inline]
    pub fn extend(self, w: f32) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, w)
    }
}

impl Vec4 {
    #[inline]
    pub fn xyz(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}
