pub mod u501_generate_demo_data;
