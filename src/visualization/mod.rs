pub mod essim_vis2d;
