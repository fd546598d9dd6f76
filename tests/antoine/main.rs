mod bubble_point;
mod phase_diagram;
