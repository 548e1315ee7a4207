use avl_arena::ptr_struct;

ptr_struct!(P0);
ptr_struct!(P1[u32]);
ptr_struct!(P2());
